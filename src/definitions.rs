//! Pre-defined error codes shared by most services.
//!
//! # Taxonomy
//!
//! Codes are grouped into ranges so that a code alone tells an operator which
//! area failed. Applications add their own catalogs above [`ranges::APP_START`].
//!
//! - **Generic** (0-999): success marker and cross-cutting failures
//! - **Request** (1000-1999): caller supplied something unusable
//! - **Access** (2000-2999): authentication and authorization
//! - **Capacity** (3000-3999): rate limits, timeouts, exhaustion
//!
//! # Governance
//!
//! Ranges are checked by the `tests` module at the bottom of this file, and
//! codes must be unique across the whole catalog.

use crate::{define_error_codes, ErrorCode};

/// Error code range constants for the built-in catalog.
pub mod ranges {
    /// First generic code.
    pub const GENERIC_START: i32 = 0;
    /// Last generic code.
    pub const GENERIC_END: i32 = 999;
    /// First request-validation code.
    pub const REQUEST_START: i32 = 1000;
    /// Last request-validation code.
    pub const REQUEST_END: i32 = 1999;
    /// First access-control code.
    pub const ACCESS_START: i32 = 2000;
    /// Last access-control code.
    pub const ACCESS_END: i32 = 2999;
    /// First capacity code.
    pub const CAPACITY_START: i32 = 3000;
    /// Last capacity code.
    pub const CAPACITY_END: i32 = 3999;
    /// Application catalogs start here.
    pub const APP_START: i32 = 10_000;
}

// -----------------------------------------------------------------------------
// Generic (0-999)
// -----------------------------------------------------------------------------
define_error_codes! {
    /// Not an error; used where a status must always carry a code.
    SUCCESS = (0, "success"),
    /// Unclassified server-side failure.
    SERVER_ERROR = (500, "internal server error"),
    /// Functionality exists in the API but is not implemented.
    NOT_IMPLEMENTED = (501, "not implemented: {}"),
    /// A dependency returned something unusable.
    UPSTREAM_FAILED = (502, "upstream {} failed"),
}

// -----------------------------------------------------------------------------
// Request (1000-1999)
// -----------------------------------------------------------------------------
define_error_codes! {
    /// Parameters failed validation.
    INVALID_PARAMS = (1000, "invalid params"),
    /// A required parameter was absent.
    MISSING_PARAM = (1001, "missing param {}"),
    /// The addressed entity does not exist.
    NOT_FOUND = (1004, "{} not found"),
    /// The entity already exists.
    ALREADY_EXISTS = (1009, "{} already exists"),
}

// -----------------------------------------------------------------------------
// Access (2000-2999)
// -----------------------------------------------------------------------------
define_error_codes! {
    /// No valid credentials were presented.
    UNAUTHENTICATED = (2001, "unauthenticated"),
    /// Credentials were valid but lack permission.
    PERMISSION_DENIED = (2003, "permission denied"),
    /// The presented token has expired.
    TOKEN_EXPIRED = (2004, "token expired"),
}

// -----------------------------------------------------------------------------
// Capacity (3000-3999)
// -----------------------------------------------------------------------------
define_error_codes! {
    /// Caller exceeded its request rate.
    TOO_MANY_REQUESTS = (3029, "too many requests"),
    /// An operation did not finish in time.
    TIMEOUT = (3008, "{} timed out"),
    /// A bounded resource is exhausted.
    RESOURCE_EXHAUSTED = (3010, "{} exhausted"),
}

/// Every built-in catalog entry.
pub static ALL: [ErrorCode; 14] = [
    SUCCESS,
    SERVER_ERROR,
    NOT_IMPLEMENTED,
    UPSTREAM_FAILED,
    INVALID_PARAMS,
    MISSING_PARAM,
    NOT_FOUND,
    ALREADY_EXISTS,
    UNAUTHENTICATED,
    PERMISSION_DENIED,
    TOKEN_EXPIRED,
    TOO_MANY_REQUESTS,
    TIMEOUT,
    RESOURCE_EXHAUSTED,
];

/// Look up a built-in entry by code.
pub fn lookup(code: i32) -> Option<&'static ErrorCode> {
    ALL.iter().find(|entry| entry.code() == code)
}

#[cfg(test)]
mod tests {
    use super::ranges::*;
    use super::*;
    use std::collections::HashSet;

    fn in_range(code: i32, start: i32, end: i32) -> bool {
        (start..=end).contains(&code)
    }

    #[test]
    fn generic_codes_in_range() {
        for code in [&SUCCESS, &SERVER_ERROR, &NOT_IMPLEMENTED, &UPSTREAM_FAILED] {
            assert!(in_range(code.code(), GENERIC_START, GENERIC_END), "{}", code);
        }
    }

    #[test]
    fn request_codes_in_range() {
        for code in [&INVALID_PARAMS, &MISSING_PARAM, &NOT_FOUND, &ALREADY_EXISTS] {
            assert!(in_range(code.code(), REQUEST_START, REQUEST_END), "{}", code);
        }
    }

    #[test]
    fn access_codes_in_range() {
        for code in [&UNAUTHENTICATED, &PERMISSION_DENIED, &TOKEN_EXPIRED] {
            assert!(in_range(code.code(), ACCESS_START, ACCESS_END), "{}", code);
        }
    }

    #[test]
    fn capacity_codes_in_range() {
        for code in [&TOO_MANY_REQUESTS, &TIMEOUT, &RESOURCE_EXHAUSTED] {
            assert!(in_range(code.code(), CAPACITY_START, CAPACITY_END), "{}", code);
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for entry in &ALL {
            assert!(seen.insert(entry.code()), "duplicate code {}", entry.code());
        }
    }

    #[test]
    fn builtins_stay_below_application_space() {
        assert!(ALL.iter().all(|entry| entry.code() < APP_START));
    }

    #[test]
    fn lookup_finds_entries() {
        assert_eq!(lookup(1004), Some(&NOT_FOUND));
        assert!(lookup(-1).is_none());
    }

    #[test]
    fn templates_render() {
        let err = NOT_FOUND.to_error_with(&[&"order"]);
        assert_eq!(err.message(), "order not found");
    }
}
