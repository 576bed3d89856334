//! Error code catalog entries.
//!
//! An `ErrorCode` pairs a stable numeric code with a message template. Catalogs
//! are declared once as `const` items and turned into `CodedError` values at the
//! point of failure:
//!
//! ```rust
//! use coded_errors::{ErrorCode, define_error_codes};
//!
//! define_error_codes! {
//!     USER_NOT_FOUND = (1001, "user {} not found"),
//!     QUOTA_EXCEEDED = (1002, "quota exceeded"),
//! }
//!
//! let err = USER_NOT_FOUND.to_error_with(&[&"alice"]);
//! assert_eq!(err.code(), 1001);
//! assert_eq!(err.message(), "user alice not found");
//! ```
//!
//! # Identity
//!
//! Codes are meant to be globally unique within an application. This crate does
//! not enforce uniqueness; `definitions` shows the range-per-area convention
//! checked by tests instead.

use crate::site::CallSite;
use crate::template;
use crate::CodedError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A catalog entry: numeric code plus message template.
///
/// Serializes as `{"code": 1001, "msg": "user {} not found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    code: i32,
    #[serde(rename = "msg")]
    message: Cow<'static, str>,
}

impl ErrorCode {
    /// Declare a catalog entry. Usable in `const` items.
    #[inline]
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self {
            code,
            message: Cow::Borrowed(message),
        }
    }

    /// Build an entry at runtime (catalogs loaded from configuration, etc.).
    #[inline]
    pub fn owned(code: i32, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Numeric code.
    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Message template, unrendered.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Create an error carrying this code and the template text as-is.
    ///
    /// The template is *not* rendered: `"{}"` stays `"{}"`, ready for a later
    /// `fill_msg`. Captures the caller's file and line, not its function.
    #[track_caller]
    #[inline]
    pub fn to_error(&self) -> CodedError {
        self.to_error_at(CallSite::caller(), &[])
    }

    /// Create an error whose message is the template rendered with `args`.
    ///
    /// With an empty `args` slice this behaves exactly like [`to_error`](Self::to_error).
    /// Captures the caller's file and line; the function segment stays empty.
    /// [`errcode!`](crate::errcode) records the function name as well.
    #[track_caller]
    #[inline]
    pub fn to_error_with(&self, args: &[&dyn fmt::Display]) -> CodedError {
        self.to_error_at(CallSite::caller(), args)
    }

    /// Create an error with an explicitly supplied call site.
    ///
    /// This is what `errcode!` expands to; pass `None` for errors that should
    /// carry no provenance.
    pub fn to_error_at(&self, site: Option<CallSite>, args: &[&dyn fmt::Display]) -> CodedError {
        let message = if args.is_empty() {
            self.message.clone().into_owned()
        } else {
            template::render(&self.message, args)
        };
        CodedError::at(site, self.code, message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code={}, msg={}", self.code, self.message)
    }
}
