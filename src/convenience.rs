//! Convenience macros for declaring codes and raising errors.
//!
//! The macros expand in the caller's body, which lets them record the short
//! name of the enclosing function in addition to file and line:
//!
//! ```rust
//! use coded_errors::{coded_err, define_error_codes, errcode};
//!
//! define_error_codes! {
//!     /// Raised when an order id is unknown.
//!     ORDER_MISSING = (3001, "order {} missing"),
//! }
//!
//! fn cancel(id: u64) -> coded_errors::Result<()> {
//!     Err(errcode!(ORDER_MISSING, id))
//! }
//!
//! let err = cancel(42).unwrap_err();
//! assert_eq!(err.message(), "order 42 missing");
//!
//! let adhoc = coded_err!(3999, "retry budget {} exhausted", 5);
//! assert_eq!(adhoc.message(), "retry budget 5 exhausted");
//! ```

/// Capture the current call site, including the enclosing function's name.
///
/// Evaluates to `Option<CallSite>`; `None` only when capture is compiled out.
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __coded_errors_probe() {}
        $crate::site::CallSite::from_parts(
            file!(),
            ::std::any::type_name_of_val(&__coded_errors_probe),
            line!(),
        )
    }};
}

/// Raise an error from an `ErrorCode`, optionally rendering its template.
///
/// - `errcode!(CODE)` keeps the template text unchanged
/// - `errcode!(CODE, a, b)` fills its placeholders with `a` and `b`
#[macro_export]
macro_rules! errcode {
    ($code:expr $(,)?) => {
        $code.to_error_at($crate::call_site!(), &[])
    };
    ($code:expr, $($arg:expr),+ $(,)?) => {
        $code.to_error_at($crate::call_site!(), &[$(&$arg),+])
    };
}

/// Raise an ad-hoc error from a raw code and message.
///
/// - `coded_err!(code, msg)` stores `msg` verbatim
/// - `coded_err!(code, template, a, b)` renders `template` with `a` and `b`
#[macro_export]
macro_rules! coded_err {
    ($code:expr, $msg:expr $(,)?) => {
        $crate::CodedError::at($crate::call_site!(), $code, $msg)
    };
    ($code:expr, $template:expr, $($arg:expr),+ $(,)?) => {
        $crate::CodedError::at(
            $crate::call_site!(),
            $code,
            $crate::template::render(&$template, &[$(&$arg),+]),
        )
    };
}

/// Define a single `ErrorCode` constant.
///
/// ```rust
/// # use coded_errors::define_error_code;
/// define_error_code!(PAYMENT_DECLINED, 4002, "payment declined: {}");
/// assert_eq!(PAYMENT_DECLINED.code(), 4002);
/// ```
#[macro_export]
macro_rules! define_error_code {
    ($(#[$meta:meta])* $name:ident, $code:expr, $message:expr) => {
        $(#[$meta])*
        pub const $name: $crate::ErrorCode = $crate::ErrorCode::new($code, $message);
    };
}

/// Define multiple `ErrorCode` constants.
///
/// ```rust
/// # use coded_errors::define_error_codes;
/// define_error_codes! {
///     CART_EMPTY = (5001, "cart is empty"),
///     CART_ITEM_LIMIT = (5002, "cart holds at most {} items"),
/// }
/// assert_eq!(CART_ITEM_LIMIT.message(), "cart holds at most {} items");
/// ```
#[macro_export]
macro_rules! define_error_codes {
    ($( $(#[$meta:meta])* $name:ident = ($code:expr, $message:expr) ),+ $(,)?) => {
        $(
            $crate::define_error_code!($(#[$meta])* $name, $code, $message);
        )+
    };
}

// ============================================================================
// Tests
// ============================================================================
