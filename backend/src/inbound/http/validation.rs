//! Request validation helpers shared by the HTTP handlers.

use serde_json::json;

use crate::domain::Error;

/// Smallest accepted page size.
pub const PAGE_SIZE_MIN: u32 = 1;
/// Largest accepted page size.
pub const PAGE_SIZE_MAX: u32 = 100;
/// Page size applied when the query omits one.
pub const PAGE_SIZE_DEFAULT: u32 = 10;

/// Resolve the 1-based page number, rejecting zero.
pub fn page_number(raw: Option<u32>) -> Result<u32, Error> {
    match raw {
        None => Ok(1),
        Some(0) => Err(
            Error::invalid_request("pageNumber must be at least 1")
                .with_details(json!({ "field": "pageNumber" })),
        ),
        Some(value) => Ok(value),
    }
}

/// Resolve the page size, enforcing the 1..=100 window.
pub fn page_size(raw: Option<u32>) -> Result<u32, Error> {
    match raw {
        None => Ok(PAGE_SIZE_DEFAULT),
        Some(value) if (PAGE_SIZE_MIN..=PAGE_SIZE_MAX).contains(&value) => Ok(value),
        Some(_) => Err(Error::invalid_request(format!(
            "pageSize must be between {PAGE_SIZE_MIN} and {PAGE_SIZE_MAX}"
        ))
        .with_details(json!({ "field": "pageSize" }))),
    }
}

/// Wrap a field-level validation failure in the standard envelope.
pub fn field_error(field: &str, error: impl std::fmt::Display) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}
