//! Error types for rendezvous-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid event configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid event length: {0}")]
    InvalidEventLength(String),

    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),

    #[error("Invalid timezone offset: {0} minutes")]
    InvalidTimezoneOffset(i32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
