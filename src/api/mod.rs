mod client;
mod error;
mod time;
mod types;

pub use client::{ClientConfig, ScheduleClient};
pub use error::ApiError;
pub use time::{format_label, pad, parse_label, LabelError};
pub use types::*;
