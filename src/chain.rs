//! Code-based identity and cause-chain inspection.
//!
//! Two coded errors are "the same error" when their codes match; message,
//! cause, payload and call site are incidental. This lets callers compare a
//! returned error against a catalog sentinel:
//!
//! ```rust
//! use coded_errors::{CodedError, ErrorCode, has_code};
//!
//! const NOT_FOUND: ErrorCode = ErrorCode::new(404, "not found");
//!
//! let err = CodedError::new(500, "lookup failed")
//!     .wrap(NOT_FOUND.to_error().with_msg("user {} missing", &[&7]));
//!
//! assert!(err != NOT_FOUND);
//! assert!(has_code(&err, NOT_FOUND.code()));
//! ```
//!
//! The walkers here follow `std::error::Error::source`, so chains that pass
//! through foreign error types are traversed as well.

use crate::{CodedError, ErrorCode};
use std::error::Error;

impl CodedError {
    /// True when `target` is a `CodedError` with the same code.
    ///
    /// Any other error type never compares equal.
    #[inline]
    pub fn is(&self, target: &(dyn Error + 'static)) -> bool {
        target
            .downcast_ref::<CodedError>()
            .is_some_and(|other| other.code() == self.code())
    }

    /// True when this error carries the catalog entry's code.
    #[inline]
    pub fn matches(&self, code: &ErrorCode) -> bool {
        self.code() == code.code()
    }
}

/// Code comparison with absent values: `None` is equal only to `None`.
///
/// ```rust
/// # use coded_errors::{chain, CodedError};
/// let a = CodedError::new(1, "a");
/// assert!(chain::is(None, None));
/// assert!(!chain::is(Some(&a), None));
/// assert!(!chain::is(None, Some(&a)));
/// assert!(chain::is(Some(&a), Some(&CodedError::new(1, "b"))));
/// ```
pub fn is(err: Option<&CodedError>, target: Option<&(dyn Error + 'static)>) -> bool {
    match (err, target) {
        (None, None) => true,
        (Some(err), Some(target)) => err.is(target),
        _ => false,
    }
}

impl PartialEq for CodedError {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for CodedError {}

impl PartialEq<ErrorCode> for CodedError {
    fn eq(&self, other: &ErrorCode) -> bool {
        self.matches(other)
    }
}

impl PartialEq<CodedError> for ErrorCode {
    fn eq(&self, other: &CodedError) -> bool {
        other.matches(self)
    }
}

/// Iterator over an error and its successive `source()`s.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Walk `err` followed by each of its causes, outermost first.
#[inline]
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// The innermost error of the chain (`err` itself when it has no source).
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    chain(err).last().unwrap_or(err)
}

/// First `CodedError` in the chain carrying `code`.
pub fn find_code<'a>(err: &'a (dyn Error + 'static), code: i32) -> Option<&'a CodedError> {
    chain(err)
        .filter_map(|e| e.downcast_ref::<CodedError>())
        .find(|e| e.code() == code)
}

/// Whether any `CodedError` in the chain carries `code`.
#[inline]
pub fn has_code(err: &(dyn Error + 'static), code: i32) -> bool {
    find_code(err, code).is_some()
}
