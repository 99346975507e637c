use super::{TaggingError, TaggingResult};

/// Longest location a post may carry, in characters
pub const MAX_LOCATION_CHARS: usize = 200;

/// Trim editor input and check it fits on a post.
///
/// Length is checked after trimming, so surrounding whitespace never
/// pushes a location over the limit.
pub fn validate_location(input: &str) -> TaggingResult<String> {
    let trimmed = input.trim();
    let len = trimmed.chars().count();
    if len > MAX_LOCATION_CHARS {
        return Err(TaggingError::LocationTooLong {
            len,
            max: MAX_LOCATION_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
