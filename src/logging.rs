//! Structured record view for external loggers.
//!
//! This crate never logs. Callers that do hand their logger an `ErrorRecord`,
//! a borrowed view of a `CodedError` whose fields can be mapped onto any
//! structured logging schema, or written as `key='value'` pairs with
//! [`ErrorRecord::write_to`].
//!
//! The record borrows from the error and cannot outlive it, so loggers consume
//! it immediately instead of retaining copies of messages and payloads.

use crate::site::CallSite;
use serde_json::Value;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Maximum length for any individual field in `write_to` output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated fields.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed, structured view of a `CodedError`.
///
/// # Example
///
/// ```rust
/// # use coded_errors::CodedError;
/// let err = CodedError::new(404, "not found").with_data("GET /users/7");
/// err.with_record(|rec| {
///     assert_eq!(rec.code(), 404);
///     assert_eq!(rec.message(), "not found");
///     // logger.info(rec.code(), rec.message(), ...);
/// });
/// ```
#[derive(Clone, Copy)]
pub struct ErrorRecord<'a> {
    pub(crate) code: i32,
    pub(crate) message: &'a str,
    pub(crate) call_site: Option<&'a CallSite>,
    pub(crate) cause: Option<&'a (dyn Error + Send + Sync + 'static)>,
    pub(crate) data: Option<&'a Value>,
}

impl<'a> ErrorRecord<'a> {
    /// Numeric error code.
    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Current message text.
    #[inline]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// Source file of the construction site.
    #[inline]
    pub fn file(&self) -> Option<&'static str> {
        self.call_site.map(CallSite::file)
    }

    /// Short function name of the construction site.
    #[inline]
    pub fn function(&self) -> Option<&'static str> {
        self.call_site.and_then(CallSite::function)
    }

    /// Line number of the construction site.
    #[inline]
    pub fn line(&self) -> Option<u32> {
        self.call_site.map(CallSite::line)
    }

    /// Immediate cause, if one was wrapped.
    #[inline]
    pub fn cause(&self) -> Option<&'a (dyn Error + Send + Sync + 'static)> {
        self.cause
    }

    /// Attached payload.
    #[inline]
    pub const fn data(&self) -> Option<&'a Value> {
        self.data
    }

    /// Write the record as space-separated `key='value'` pairs.
    ///
    /// Absent fields are omitted. Each value is capped at
    /// [`MAX_FIELD_OUTPUT_LEN`] bytes so a runaway message or payload cannot
    /// flood the log sink.
    ///
    /// ```rust
    /// # use coded_errors::CodedError;
    /// let err = CodedError::at(None, 404, "not found");
    /// let mut line = String::new();
    /// err.record().write_to(&mut line).unwrap();
    /// assert_eq!(line, "code=404 msg='not found'");
    /// ```
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "code={} msg='{}'",
            self.code,
            truncate_with_indicator(self.message)
        )?;

        if let Some(site) = self.call_site {
            write!(f, " file='{}'", truncate_with_indicator(site.file()))?;
            if let Some(function) = site.function() {
                write!(f, " function='{}'", function)?;
            }
            write!(f, " line={}", site.line())?;
        }

        if let Some(cause) = self.cause {
            let rendered = cause.to_string();
            write!(f, " cause='{}'", truncate_with_indicator(&rendered))?;
        }

        if let Some(data) = self.data {
            let rendered = data.to_string();
            write!(f, " data='{}'", truncate_with_indicator(&rendered))?;
        }

        Ok(())
    }
}

impl fmt::Debug for ErrorRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRecord")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("call_site", &self.call_site)
            .field("cause", &self.cause.map(|c| c.to_string()))
            .field("data", &self.data)
            .finish()
    }
}

/// Cap `s` at [`MAX_FIELD_OUTPUT_LEN`] bytes, cutting on a char boundary.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();
    let cut = s
        .char_indices()
        .map(|(start, c)| start + c.len_utf8())
        .take_while(|&end| end <= budget)
        .last()
        .unwrap_or(0);

    let mut out = String::with_capacity(cut + TRUNCATION_INDICATOR.len());
    out.push_str(&s[..cut]);
    out.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodedError;

    #[test]
    fn truncate_ascii() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN + 10);
        let truncated = truncate_with_indicator(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn no_truncate_when_under_limit() {
        let truncated = truncate_with_indicator("short string");
        assert!(matches!(truncated, Cow::Borrowed(_)));
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert!(!truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn truncate_utf8_boundary() {
        // Each 'й' is 2 bytes
        let s = "й".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn truncation_keeps_whole_chars() {
        // 3-byte chars; the budget is not a multiple of 3
        let s = "€".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);
        let kept = truncated.strip_suffix(TRUNCATION_INDICATOR).unwrap();

        assert!(kept.chars().all(|c| c == '€'));
        assert_eq!(kept.len(), (MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len()) / 3 * 3);
    }

    #[test]
    fn write_to_full_record() {
        let cause = CodedError::at(None, 500, "internal");
        let err = CodedError::at(
            Some(CallSite::new("src/users.rs", Some("load"), 12)),
            404,
            "not found",
        )
        .wrap(cause)
        .with_data(serde_json::json!({"id": 7}));

        let mut line = String::new();
        err.record().write_to(&mut line).unwrap();
        assert_eq!(
            line,
            "code=404 msg='not found' file='src/users.rs' function='load' line=12 \
             cause='code=500, msg=internal' data='{\"id\":7}'"
        );
    }

    #[test]
    fn write_to_skips_unknown_function() {
        let err = CodedError::at(Some(CallSite::new("src/a.rs", None, 3)), 1, "x");
        let mut line = String::new();
        err.record().write_to(&mut line).unwrap();
        assert_eq!(line, "code=1 msg='x' file='src/a.rs' line=3");
    }

    #[test]
    fn write_to_bounds_long_message() {
        let err = CodedError::at(None, 1, "m".repeat(10 * MAX_FIELD_OUTPUT_LEN));
        let mut line = String::new();
        err.record().write_to(&mut line).unwrap();
        assert!(line.len() < 2 * MAX_FIELD_OUTPUT_LEN);
        assert!(line.contains(TRUNCATION_INDICATOR));
    }

    #[test]
    fn accessors_mirror_error() {
        let err = CodedError::at(Some(CallSite::new("f.rs", Some("g"), 9)), 3, "m");
        let rec = err.record();
        assert_eq!(rec.file(), Some("f.rs"));
        assert_eq!(rec.function(), Some("g"));
        assert_eq!(rec.line(), Some(9));
        assert!(rec.cause().is_none());
        assert!(rec.data().is_none());
    }
}
