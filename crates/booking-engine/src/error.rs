//! Error types for booking-engine operations.
//!
//! The checkers themselves never fail; errors only come out of the input
//! adapter and the open-slot search when the caller hands over malformed data.

use thiserror::Error;

use crate::model::{EmployeeId, ServiceId};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A reservation or schedule entry names an employee missing from the roster.
    /// `owner` describes the referencing record (e.g. "reservation 12").
    #[error("{owner} references unknown employee {employee}")]
    UnknownEmployee { owner: String, employee: EmployeeId },

    #[error("Unknown service: {0}")]
    UnknownService(ServiceId),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
