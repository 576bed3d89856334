//! # Coded Errors
//!
//! Error values identified by a stable numeric code.
//!
//! ## Design Philosophy
//!
//! 1. **Codes identify, messages explain**: equality is by code only, so callers
//!    never match on message text
//! 2. **Catalogs are constants**: `ErrorCode` entries are declared once and raised
//!    many times with different message arguments
//! 3. **Causes are preserved**: any `std::error::Error` can be wrapped and is
//!    reachable through `source()`
//! 4. **Provenance is free**: every error records where it was constructed
//! 5. **Nothing here fails**: construction, mutation and rendering are infallible
//!
//! ## Quick Start
//!
//! ```rust
//! use coded_errors::{errcode, ErrorCode, Result};
//!
//! const USER_NOT_FOUND: ErrorCode = ErrorCode::new(1001, "user {} not found");
//!
//! fn load_user(name: &str) -> Result<()> {
//!     let io = std::io::Error::from(std::io::ErrorKind::NotFound);
//!     Err(errcode!(USER_NOT_FOUND, name).wrap(io))
//! }
//!
//! let err = load_user("alice").unwrap_err();
//! assert_eq!(err.code(), 1001);
//! assert_eq!(err.message(), "user alice not found");
//! assert!(err == USER_NOT_FOUND);
//! if let Some(site) = err.call_site() {
//!     assert_eq!(site.function(), Some("load_user"));
//! }
//!
//! // file=src/main.rs:load_user:7, code=1001, msg=user alice not found, cause=entity not found
//! println!("{}", err);
//! ```
//!
//! ## Recovering Function Names
//!
//! The macros record file, line and the enclosing function. The
//! `#[track_caller]` constructors (`CodedError::new`, `ErrorCode::to_error`,
//! `ErrorCode::to_error_with`) record file and line only, so their function
//! segment renders empty: `file=src/main.rs::7, code=...`.
//!
//! ```rust
//! use coded_errors::{errcode, ErrorCode};
//!
//! const COUNT_TOO_HIGH: ErrorCode = ErrorCode::new(2001, "count={}");
//!
//! fn check(count: u32) -> coded_errors::Result<()> {
//!     if count > 3 {
//!         return Err(errcode!(COUNT_TOO_HIGH, count));
//!     }
//!     Ok(())
//! }
//!
//! let err = check(5).unwrap_err();
//! if let Some(site) = err.call_site() {
//!     assert_eq!(site.function(), Some("check"));
//! }
//! ```
//!
//! ## Features
//!
//! - `redacted_debug`: `Debug` output hides message, cause and payload
//! - `strip_call_site`: compile out call-site capture entirely

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::result;
use zeroize::Zeroize;

pub mod chain;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod logging;
pub mod site;
pub mod template;

pub use chain::{find_code, has_code, root_cause};
pub use codes::ErrorCode;
pub use logging::ErrorRecord;
pub use site::CallSite;

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, CodedError>;

/// Boxed cause accepted by [`CodedError::wrap`].
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

/// An error value: numeric code, message, optional cause, payload and call site.
///
/// # Lifecycle
///
/// Created by [`CodedError::new`], [`CodedError::at`], an [`ErrorCode`]
/// conversion, or one of the macros; enriched through the consuming `with_*`
/// style mutators; then returned. Each failure builds a fresh value.
///
/// # Invariants
///
/// - `code` is fixed at construction; there is no setter
/// - the call site is captured once, by the constructor
/// - `wrap` and `with_data` overwrite earlier values (last write wins)
///
/// The message buffer is zeroized on drop; messages routinely embed
/// user-supplied values.
#[must_use = "errors should be handled or returned"]
pub struct CodedError {
    code: i32,
    message: String,
    cause: Option<Cause>,
    data: Option<Value>,
    call_site: Option<CallSite>,
}

impl CodedError {
    /// Create an error from a code and a literal message.
    ///
    /// The message is stored verbatim (it is not treated as a template).
    /// Captures the caller's file and line but no function name; use
    /// [`coded_err!`] when the function segment should be filled.
    #[track_caller]
    #[inline]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self::at(CallSite::caller(), code, message)
    }

    /// Create an error with an explicit call site, or none at all.
    #[inline]
    pub fn at(call_site: Option<CallSite>, code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
            data: None,
            call_site,
        }
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Set the wrapped cause, replacing any earlier one.
    ///
    /// Accepts any `Error + Send + Sync + 'static`, an existing boxed error,
    /// or a plain `String`/`&str`.
    #[inline]
    pub fn wrap(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Attach a diagnostic payload, replacing any earlier one.
    ///
    /// `Value::Null` clears the payload.
    ///
    /// ```rust
    /// # use coded_errors::CodedError;
    /// let err = CodedError::new(409, "conflict")
    ///     .with_data(serde_json::json!({"resource": "order", "id": 42}));
    /// assert_eq!(err.data().unwrap()["id"], 42);
    /// ```
    #[inline]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into()).filter(|v| !v.is_null());
        self
    }

    /// Append `suffix` to the message, then, if `args` is non-empty, re-render
    /// the *whole* message prefixed with a single space as a template.
    ///
    /// Placeholders anywhere in the accumulated message are filled, including
    /// ones that arrived inside `suffix`:
    ///
    /// ```rust
    /// # use coded_errors::CodedError;
    /// let err = CodedError::at(None, 1, "open").append_msg(" {} failed", &[&"db"]);
    /// assert_eq!(err.message(), " open db failed");
    /// ```
    pub fn append_msg(mut self, suffix: &str, args: &[&dyn fmt::Display]) -> Self {
        if !suffix.is_empty() {
            self.message.push_str(suffix);
        }
        if !args.is_empty() {
            let mut spaced = format!(" {}", self.message);
            let rendered = template::render(&spaced, args);
            spaced.zeroize();
            self.replace_message(rendered);
        }
        self
    }

    /// Replace the message, rendering it with `args` when any are given.
    pub fn with_msg(mut self, message: impl Into<String>, args: &[&dyn fmt::Display]) -> Self {
        let mut message = message.into();
        if !args.is_empty() {
            let rendered = template::render(&message, args);
            message.zeroize();
            message = rendered;
        }
        self.replace_message(message);
        self
    }

    /// Render the current message in place with `args`.
    ///
    /// For messages that still hold placeholders, typically produced by
    /// [`ErrorCode::to_error`]. No-op when `args` is empty.
    pub fn fill_msg(mut self, args: &[&dyn fmt::Display]) -> Self {
        if !args.is_empty() {
            let rendered = template::render(&self.message, args);
            self.replace_message(rendered);
        }
        self
    }

    fn replace_message(&mut self, message: String) {
        let mut previous = std::mem::replace(&mut self.message, message);
        previous.zeroize();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Numeric code.
    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Current message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached payload, if any.
    #[inline]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The wrapped cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Consume the error and take ownership of its cause.
    #[inline]
    pub fn into_cause(mut self) -> Option<Cause> {
        self.cause.take()
    }

    /// Where the error was constructed, when captured.
    #[inline]
    pub const fn call_site(&self) -> Option<&CallSite> {
        self.call_site.as_ref()
    }

    /// Borrowed structured view for loggers.
    #[inline]
    pub fn record(&self) -> ErrorRecord<'_> {
        ErrorRecord {
            code: self.code,
            message: &self.message,
            call_site: self.call_site.as_ref(),
            cause: self.cause.as_deref(),
            data: self.data.as_ref(),
        }
    }

    /// Callback-style access to [`record`](Self::record).
    #[inline]
    pub fn with_record<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ErrorRecord<'_>) -> R,
    {
        let record = self.record();
        f(&record)
    }
}

impl Drop for CodedError {
    fn drop(&mut self) {
        self.message.zeroize();
    }
}

impl fmt::Display for CodedError {
    /// `file=<path>:<func>:<line>, code=<code>, msg=<message>, cause=<cause>, data=<data>`
    ///
    /// `file=`, `cause=` and `data=` appear only when present. The cause is
    /// rendered through its own `Display`, so nested coded errors flatten into
    /// one line. String payloads are written raw, everything else as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(site) = &self.call_site {
            write!(f, "file={}, ", site)?;
        }

        write!(f, "code={}, msg={}", self.code, self.message)?;

        if let Some(cause) = &self.cause {
            write!(f, ", cause={}", cause)?;
        }

        match &self.data {
            Some(Value::String(s)) => write!(f, ", data={}", s)?,
            Some(other) => write!(f, ", data={}", other)?,
            None => {}
        }

        Ok(())
    }
}

impl fmt::Debug for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("CodedError");
        d.field("code", &self.code);

        #[cfg(not(feature = "redacted_debug"))]
        {
            d.field("message", &self.message)
                .field("cause", &self.cause)
                .field("data", &self.data);
        }

        #[cfg(feature = "redacted_debug")]
        {
            d.field("message", &"<REDACTED>")
                .field("cause", &self.cause.as_ref().map(|_| "<PRESENT>"))
                .field("data", &self.data.as_ref().map(|_| "<PRESENT>"));
        }

        d.field("call_site", &self.call_site).finish()
    }
}

impl Error for CodedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::io;

    fn bare(code: i32, message: &str) -> CodedError {
        CodedError::at(None, code, message)
    }

    #[test]
    fn render_code_and_message_only() {
        assert_eq!(bare(404, "not found").to_string(), "code=404, msg=not found");
    }

    #[test]
    fn render_with_cause() {
        let err = bare(400, "bad request").wrap(bare(500, "internal"));
        assert_eq!(
            err.to_string(),
            "code=400, msg=bad request, cause=code=500, msg=internal"
        );
    }

    #[test]
    fn render_with_everything() {
        let site = CallSite::new("src/api.rs", Some("handle"), 88);
        let err = CodedError::at(Some(site), 1001, "user alice not found")
            .wrap(io::Error::other("disk"))
            .with_data("tenant=acme");
        assert_eq!(
            err.to_string(),
            "file=src/api.rs:handle:88, code=1001, msg=user alice not found, cause=disk, data=tenant=acme"
        );
    }

    #[test]
    fn render_structured_data_as_json() {
        let err = bare(1, "m").with_data(serde_json::json!({"k": [1, 2]}));
        assert_eq!(err.to_string(), r#"code=1, msg=m, data={"k":[1,2]}"#);
    }

    #[cfg(not(feature = "strip_call_site"))]
    #[test]
    fn new_captures_call_site() {
        let line = line!() + 1;
        let err = CodedError::new(1, "x");
        let site = err.call_site().unwrap();
        assert_eq!(site.file(), file!());
        assert_eq!(site.line(), line);
        assert!(err.to_string().starts_with(&format!("file={}::{}, ", file!(), line)));
    }

    #[test]
    fn new_keeps_message_verbatim() {
        assert_eq!(CodedError::new(1, "rate {}").message(), "rate {}");
    }

    #[test]
    fn wrap_last_write_wins() {
        let err = bare(1, "outer")
            .wrap(bare(2, "first"))
            .wrap(bare(3, "second"));
        let cause = err.cause().unwrap();
        assert_eq!(cause.to_string(), "code=3, msg=second");
        assert!(err.source().is_some());
    }

    #[test]
    fn wrap_accepts_plain_strings() {
        let err = bare(1, "outer").wrap("socket closed");
        assert_eq!(err.cause().unwrap().to_string(), "socket closed");
    }

    #[test]
    fn into_cause_returns_owned_cause() {
        let err = bare(1, "outer").wrap(bare(2, "inner"));
        let cause = err.into_cause().unwrap();
        let inner = cause.downcast_ref::<CodedError>().unwrap();
        assert_eq!(inner.code(), 2);
    }

    #[test]
    fn data_last_write_wins() {
        let err = bare(1, "m").with_data(1).with_data("two");
        assert_eq!(err.data(), Some(&Value::from("two")));
    }

    #[test]
    fn null_data_is_absent() {
        let err = bare(1, "m").with_data(Value::Null);
        assert!(err.data().is_none());
        assert_eq!(err.to_string(), "code=1, msg=m");

        let cleared = bare(1, "m").with_data("x").with_data(Value::Null);
        assert!(cleared.data().is_none());
    }

    #[test]
    fn set_message_with_args() {
        let err = bare(1, "old").with_msg("hello {}", &[&"world"]);
        assert_eq!(err.message(), "hello world");
    }

    #[test]
    fn set_message_without_args_is_verbatim() {
        let err = bare(1, "old").with_msg("literal {}", &[]);
        assert_eq!(err.message(), "literal {}");
    }

    #[test]
    fn fill_message() {
        let err = bare(1, "count={}").fill_msg(&[&5]);
        assert_eq!(err.message(), "count=5");
    }

    #[test]
    fn fill_message_without_args_is_noop() {
        let err = bare(1, "count={}").fill_msg(&[]);
        assert_eq!(err.message(), "count={}");
    }

    #[test]
    fn append_plain_suffix() {
        let err = bare(1, "open").append_msg(": timed out", &[]);
        assert_eq!(err.message(), "open: timed out");
    }

    #[test]
    fn append_with_args_rerenders_whole_message() {
        let err = bare(1, "count={}").append_msg(", limit={}", &[&5, &3]);
        assert_eq!(err.message(), " count=5, limit=3");
    }

    #[test]
    fn append_empty_suffix_with_args_fills_existing_placeholders() {
        let err = bare(1, "id={}").append_msg("", &[&9]);
        assert_eq!(err.message(), " id=9");
    }

    #[test]
    fn mutators_never_change_code() {
        let err = bare(77, "m")
            .with_msg("n", &[])
            .append_msg("o", &[])
            .fill_msg(&[&1])
            .wrap("c")
            .with_data(1);
        assert_eq!(err.code(), 77);
    }

    #[test]
    fn debug_shows_code() {
        let debug = format!("{:?}", bare(12, "m"));
        assert!(debug.contains("CodedError"));
        assert!(debug.contains("12"));
    }

    #[cfg(feature = "redacted_debug")]
    #[test]
    fn debug_redacts_message() {
        let debug = format!("{:?}", bare(12, "secret-token"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<CodedError>();
    }
}
