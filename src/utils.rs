//! Utility functions for the points calculator

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Parse user-entered rating text as a float
///
/// Accepts the longest leading float prefix, the way the federation form
/// input is read ("12o4" is 12, "1000pts" is 1000). Text with no numeric
/// prefix becomes NaN rather than an error; the calculation layer degrades
/// gracefully instead of aborting.
pub fn parse_rating_text(text: &str) -> f64 {
    let trimmed = text.trim();
    for end in (1..=trimmed.len()).rev() {
        if !trimmed.is_char_boundary(end) {
            continue;
        }
        if let Ok(value) = trimmed[..end].parse::<f64>() {
            return value;
        }
    }
    f64::NAN
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}
