//! Error types for holiday-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HolidayError {
    #[error("Missing day: {0}")]
    MissingDay(String),

    #[error("Empty history: {0}")]
    EmptyHistory(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No rules found in notice")]
    NoRules,
}

pub type Result<T> = std::result::Result<T, HolidayError>;
