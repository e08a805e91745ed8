//! Error types for exam-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid conflict pair: {0}")]
    InvalidPair(String),

    #[error("Invalid exam: {0}")]
    InvalidExam(String),

    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),

    #[error("Unsatisfiable date walk: {0}")]
    UnsatisfiableDateWalk(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
