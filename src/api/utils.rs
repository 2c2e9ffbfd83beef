//! API utility functions
//!
//! Pure, stateless helpers for request processing shared by the operation
//! handlers and the local HTTP front door.

use std::collections::HashMap;

use crate::api::error::ApiError;

/// Query string key carrying the requested page
pub const PAGE_PARAM: &str = "page";

/// Read the requested page from the query parameters.
///
/// Absent or empty means page 1. Anything that is not a base-10 integer is
/// rejected, and so are integers below 1.
pub fn parse_page(query: &HashMap<String, String>) -> Result<usize, ApiError> {
    let raw = query
        .get(PAGE_PARAM)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .unwrap_or("1");

    let page: i64 = raw
        .parse()
        .map_err(|_| ApiError::NonNumericPage(raw.to_string()))?;

    if page < 1 {
        return Err(ApiError::PageBelowOne(page));
    }

    usize::try_from(page).map_err(|_| ApiError::NonNumericPage(raw.to_string()))
}

/// Validates that body size does not exceed the maximum allowed size
pub fn validate_body_size(data: &[u8], max_size: usize) -> Result<(), ApiError> {
    if data.len() > max_size {
        return Err(ApiError::PayloadTooLarge(data.len()));
    }
    Ok(())
}
