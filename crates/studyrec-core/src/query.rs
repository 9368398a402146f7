use crate::error::{Error, Result};

/// Shortest accepted query length, in characters, after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

/// Boundary validation for user-entered queries.
///
/// The engine itself accepts any string; callers that want to reject
/// blank or one-letter input apply this before calling `recommend`.
pub fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(Error::InvalidQuery(format!(
            "query must contain at least {MIN_QUERY_CHARS} characters, got {:?}",
            trimmed
        )));
    }
    Ok(trimmed)
}
