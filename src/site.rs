//! Call-site capture for error provenance.
//!
//! Every `CodedError` records where it was constructed: the source file, the
//! short name of the enclosing function and the line number. Two capture paths
//! exist:
//!
//! - **`#[track_caller]` constructors** (`CodedError::new`, `ErrorCode::to_error`)
//!   read `std::panic::Location::caller()`. The compiler threads the location of
//!   the *application* call through the library frames, so the snapshot never
//!   points into this crate. Location carries no function name.
//! - **Macros** (`coded_err!`, `errcode!`, `call_site!`) expand in the caller's
//!   body and additionally recover the enclosing function's path through
//!   `std::any::type_name_of_val` on a nested item.
//!
//! Capture cannot fail. When nothing usable is available (or the
//! `strip_call_site` feature is enabled) the error is simply built without a
//! call site.

use std::fmt;
use std::panic::Location;

/// Name of the helper item that `call_site!` declares to probe its own path.
#[doc(hidden)]
pub const PROBE_ITEM: &str = "__coded_errors_probe";

const CLOSURE_SEGMENT: &str = "{{closure}}";

/// Immutable snapshot of the source location that constructed an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    function: Option<&'static str>,
    line: u32,
}

impl CallSite {
    /// Build a call site from already-known parts.
    #[inline]
    pub const fn new(file: &'static str, function: Option<&'static str>, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    /// Capture the location of the caller of the enclosing `#[track_caller]` chain.
    ///
    /// Returns `None` only when capture is compiled out.
    #[track_caller]
    #[inline]
    pub fn caller() -> Option<Self> {
        if !capture_enabled() {
            return None;
        }
        let location = Location::caller();
        Self::resolve(location.file(), None, location.line())
    }

    /// Capture from macro-provided parts; `function_path` is a raw type path as
    /// produced by `type_name_of_val`.
    ///
    /// Used by `call_site!()`; rarely called directly.
    #[inline]
    pub fn from_parts(file: &'static str, function_path: &'static str, line: u32) -> Option<Self> {
        if !capture_enabled() {
            return None;
        }
        Self::resolve(file, short_function_name(function_path), line)
    }

    fn resolve(file: &'static str, function: Option<&'static str>, line: u32) -> Option<Self> {
        if file.is_empty() {
            return None;
        }
        Some(Self::new(file, function, line))
    }

    /// Source file path as reported by the compiler.
    #[inline]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Short name of the enclosing function, when it could be resolved.
    #[inline]
    pub const fn function(&self) -> Option<&'static str> {
        self.function
    }

    /// 1-based line number.
    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    /// `<file>:<function>:<line>`; the function segment is empty when unknown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file,
            self.function.unwrap_or(""),
            self.line
        )
    }
}

/// Whether call-site capture is compiled in.
#[inline]
pub const fn capture_enabled() -> bool {
    !cfg!(feature = "strip_call_site")
}

/// Reduce a raw function path to its last path segment.
///
/// Strips the probe item appended by `call_site!`, then any trailing
/// `{{closure}}` segments, then keeps everything after the final `::`.
///
/// ```rust
/// # use coded_errors::site::short_function_name;
/// assert_eq!(short_function_name("app::users::load_user"), Some("load_user"));
/// assert_eq!(short_function_name("<app::Repo as app::Store>::get::{{closure}}"), Some("get"));
/// assert_eq!(short_function_name(""), None);
/// ```
pub fn short_function_name(raw: &'static str) -> Option<&'static str> {
    let mut path = raw.trim();
    if let Some(stripped) = path.strip_suffix(PROBE_ITEM) {
        path = stripped.strip_suffix("::").unwrap_or(stripped);
    }
    while let Some(stripped) = path.strip_suffix(CLOSURE_SEGMENT) {
        path = stripped.strip_suffix("::").unwrap_or(stripped);
    }

    let name = match path.rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    };
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_plain_path() {
        assert_eq!(short_function_name("crate_a::module::handler"), Some("handler"));
    }

    #[test]
    fn short_name_strips_probe() {
        let raw = "crate_a::module::handler::__coded_errors_probe";
        assert_eq!(short_function_name(raw), Some("handler"));
    }

    #[test]
    fn short_name_strips_nested_closures() {
        let raw = "crate_a::run::{{closure}}::{{closure}}::__coded_errors_probe";
        assert_eq!(short_function_name(raw), Some("run"));
    }

    #[test]
    fn short_name_trait_method() {
        let raw = "<crate_a::Repo as crate_a::Store>::fetch::__coded_errors_probe";
        assert_eq!(short_function_name(raw), Some("fetch"));
    }

    #[test]
    fn short_name_without_qualification() {
        assert_eq!(short_function_name("main"), Some("main"));
    }

    #[test]
    fn short_name_degenerate_inputs() {
        assert_eq!(short_function_name(""), None);
        assert_eq!(short_function_name("::"), None);
        assert_eq!(short_function_name(PROBE_ITEM), None);
        assert_eq!(short_function_name("{{closure}}"), None);
    }

    #[cfg(not(feature = "strip_call_site"))]
    #[test]
    fn caller_points_at_this_file() {
        let line = line!() + 1;
        let site = CallSite::caller().unwrap();
        assert_eq!(site.file(), file!());
        assert_eq!(site.line(), line);
        assert_eq!(site.function(), None);
    }

    #[cfg(not(feature = "strip_call_site"))]
    #[test]
    fn from_parts_rejects_empty_file() {
        assert!(CallSite::from_parts("", "a::b", 1).is_none());
    }

    #[cfg(feature = "strip_call_site")]
    #[test]
    fn capture_compiled_out() {
        assert!(CallSite::caller().is_none());
        assert!(CallSite::from_parts("src/lib.rs", "a::b", 1).is_none());
    }

    #[test]
    fn display_with_and_without_function() {
        let site = CallSite::new("src/users.rs", Some("load_user"), 42);
        assert_eq!(site.to_string(), "src/users.rs:load_user:42");

        let site = CallSite::new("src/users.rs", None, 7);
        assert_eq!(site.to_string(), "src/users.rs::7");
    }
}
