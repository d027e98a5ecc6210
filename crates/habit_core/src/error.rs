use thiserror::Error;

use crate::habit::HabitId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("habit {0} not found")]
    NotFound(HabitId),
    #[error("habit name is required")]
    EmptyName,
    #[error("invalid calendar date `{input}`, expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("invalid habit id `{input}`")]
    InvalidId { input: String },
}

pub type Result<T, E = HabitError> = std::result::Result<T, E>;
