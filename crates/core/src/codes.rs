//! Stable, machine-readable error codes used by the built-in factories.
//!
//! Clients may match on these strings; renaming one is a breaking change.

pub const UNKNOWN: &str = "UNKNOWN_ERROR";

pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const MISSING_PARAMETER: &str = "MISSING_PARAMETER";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";

pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
pub const MISSING_TOKEN: &str = "MISSING_TOKEN";

pub const FORBIDDEN: &str = "FORBIDDEN";
pub const MISSING_ROLE: &str = "MISSING_ROLE";
pub const MISSING_PERMISSION: &str = "MISSING_PERMISSION";
pub const RESOURCE_ACCESS_DENIED: &str = "RESOURCE_ACCESS_DENIED";

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
pub const RESOURCE_NOT_FOUND_BY_CRITERIA: &str = "RESOURCE_NOT_FOUND_BY_CRITERIA";

pub const CONFLICT: &str = "CONFLICT";
pub const DUPLICATE_RESOURCE: &str = "DUPLICATE_RESOURCE";
pub const CONCURRENCY_CONFLICT: &str = "CONCURRENCY_CONFLICT";
pub const INVALID_STATE_TRANSITION: &str = "INVALID_STATE_TRANSITION";

pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const FIELD_VALIDATION_FAILED: &str = "FIELD_VALIDATION_FAILED";

pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
pub const UNHANDLED_EXCEPTION: &str = "UNHANDLED_EXCEPTION";
pub const DEPENDENCY_FAILURE: &str = "DEPENDENCY_FAILURE";

pub const TOO_MANY_REQUESTS: &str = "TOO_MANY_REQUESTS";
pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
pub const QUOTA_EXCEEDED: &str = "QUOTA_EXCEEDED";
