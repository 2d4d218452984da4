use findmybike_api::types::{Aspect, BikeType, Color, Frame, PostingId};

use crate::error::FindMyBikeError;

pub const MAX_POSTING_ID_LENGTH: usize = 64;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, FindMyBikeError> {
    if input.len() > max_len {
        return Err(FindMyBikeError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(FindMyBikeError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Lowercase, trim, and fold `-` and spaces into `_` so that `Swan-Neck`,
/// `swan neck` and `swan_neck` all compare equal.
fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Finds the value whose wire name or label matches `input`.
fn match_value<T: Copy>(
    input: &str,
    values: &[T],
    wire: impl Fn(&T) -> &'static str,
    label: impl Fn(&T) -> &'static str,
) -> Option<T> {
    let wanted = normalize(input);
    values
        .iter()
        .copied()
        .find(|v| wire(v) == wanted || normalize(label(v)) == wanted)
}

fn unknown_value(aspect: Aspect, input: &str, valid: Vec<&str>) -> FindMyBikeError {
    FindMyBikeError::InvalidInput(format!(
        "unknown {} '{}'. Valid values: {}",
        aspect,
        input,
        valid.join(", ")
    ))
}

/// Validate a bike type: case-insensitive, accepts wire names and labels
/// (e.g. `children` or "Children Bike").
pub fn validate_bike(input: &str) -> Result<BikeType, FindMyBikeError> {
    match_value(input, &BikeType::ALL, |v| v.as_str(), |v| v.label()).ok_or_else(|| {
        unknown_value(
            Aspect::Bike,
            input,
            BikeType::ALL.iter().map(|v| v.as_str()).collect(),
        )
    })
}

/// Validate a frame shape: case-insensitive, `swan-neck`, `swan neck` and
/// "Swan Neck" all resolve to `swan_neck`.
pub fn validate_frame(input: &str) -> Result<Frame, FindMyBikeError> {
    match_value(input, &Frame::ALL, |v| v.as_str(), |v| v.label()).ok_or_else(|| {
        unknown_value(
            Aspect::Frame,
            input,
            Frame::ALL.iter().map(|v| v.as_str()).collect(),
        )
    })
}

/// Validate a color: case-insensitive.
pub fn validate_color(input: &str) -> Result<Color, FindMyBikeError> {
    match_value(input, &Color::ALL, |v| v.as_str(), |v| v.label()).ok_or_else(|| {
        unknown_value(
            Aspect::Color,
            input,
            Color::ALL.iter().map(|v| v.as_str()).collect(),
        )
    })
}

/// Validate a posting id: strip control chars, trim, enforce length.
pub fn validate_posting_id(input: &str) -> Result<PostingId, FindMyBikeError> {
    let sanitized = sanitize_text(input, MAX_POSTING_ID_LENGTH)?;
    if sanitized.contains(char::is_whitespace) {
        return Err(FindMyBikeError::InvalidInput(format!(
            "posting id '{}' must not contain whitespace",
            sanitized
        )));
    }
    Ok(PostingId::from(sanitized))
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: u64) -> Result<u64, FindMyBikeError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(FindMyBikeError::InvalidInput(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate the number of pages to load (must be >= 1).
pub fn validate_pages(pages: u32) -> Result<u32, FindMyBikeError> {
    if pages < 1 {
        return Err(FindMyBikeError::InvalidInput("pages must be >= 1".to_string()));
    }
    Ok(pages)
}
