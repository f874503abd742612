/// Domain module containing the core records and their validation rules
///
/// This module defines the three persisted entities (Habit, Preset, Entry)
/// together with the id types and target periods they share.

pub mod habit;
pub mod preset;
pub mod entry;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use preset::*;
pub use entry::*;
pub use types::*;

use thiserror::Error;

/// Errors raised when caller input breaks a domain rule
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid option label: {0}")]
    InvalidLabel(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Habit {habit_id} must keep at least one option")]
    LastOption { habit_id: String },

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Option not found: {0}")]
    OptionNotFound(String),
}

/// Check a user-supplied amount for options and entries
///
/// Amounts may be fractional or negative but never zero, NaN or infinite.
pub fn validate_amount(value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidValue {
            message: "Value must be a finite number".to_string(),
        });
    }
    if value == 0.0 {
        return Err(DomainError::InvalidValue {
            message: "Value cannot be zero".to_string(),
        });
    }
    Ok(())
}

/// Check an option or entry label
pub fn validate_label(label: &str) -> Result<(), DomainError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidLabel(
            "Label cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 50 {
        return Err(DomainError::InvalidLabel(
            "Label cannot be longer than 50 characters".to_string(),
        ));
    }
    Ok(())
}
