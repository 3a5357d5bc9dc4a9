//! Parsing and formatting for the "HH.MM" time labels the backend uses

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("time label {0:?} is not in HH.MM form")]
    Malformed(String),
}

/// Zero-pad a number to two digits, keeping only the last two ("7" -> "07")
pub fn pad(value: i32) -> String {
    let padded = format!("0{}", value);
    padded[padded.len() - 2..].to_string()
}

/// Format an hour and minute as a "HH.MM" label
pub fn format_label(hour: i32, minute: i32) -> String {
    format!("{}.{}", pad(hour), pad(minute))
}

/// Split a "HH.MM" label into (hour, minute)
///
/// Accepts single-digit hours ("7.30") the same way the backend does, plus
/// "24.00" for classes that run to midnight. Anything else chrono can't read
/// as a wall-clock time is rejected, including minutes of 60 or more.
pub fn parse_label(label: &str) -> Result<(i32, i32), LabelError> {
    let malformed = || LabelError::Malformed(label.to_string());
    let trimmed = label.trim();

    if let Some(minute) = trimmed.strip_prefix("24.") {
        return match minute {
            "00" | "0" => Ok((24, 0)),
            _ => Err(malformed()),
        };
    }

    let time = NaiveTime::parse_from_str(trimmed, "%H.%M").map_err(|_| malformed())?;
    Ok((time.hour() as i32, time.minute() as i32))
}
