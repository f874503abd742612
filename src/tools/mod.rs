/// Caller-facing operations
///
/// Each tool takes a params struct, validates it, drives the session and
/// returns a serializable response with a human-readable `message`. The
/// command-line front end is a thin wrapper over these.

pub mod create;
pub mod log;
pub mod list;
pub mod status;
pub mod update;
pub mod data;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use list::*;
pub use status::*;
pub use update::*;
pub use data::*;

use crate::domain::{DomainError, HabitId, Period, Target};
use crate::session::HabitSession;
use crate::TrackerError;

/// Find a habit by id or by case-insensitive name
pub fn resolve_habit(session: &HabitSession, query: &str) -> Result<HabitId, TrackerError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(DomainError::Validation {
            message: "Habit id or name cannot be empty".to_string(),
        }
        .into());
    }

    if let Ok(id) = HabitId::from_string(query) {
        if session.habits().iter().any(|h| h.id == id) {
            return Ok(id);
        }
    }

    let lowered = query.to_lowercase();
    let mut matches = session
        .habits()
        .iter()
        .filter(|h| h.name.to_lowercase() == lowered);

    match (matches.next(), matches.next()) {
        (Some(habit), None) => Ok(habit.id.clone()),
        (Some(_), Some(_)) => Err(DomainError::Validation {
            message: format!("More than one habit is named '{}', use its id", query),
        }
        .into()),
        (None, _) => Err(DomainError::HabitNotFound(query.to_string()).into()),
    }
}

/// Make `query` the active habit and return its id
pub async fn activate_habit(session: &mut HabitSession, query: &str) -> Result<HabitId, TrackerError> {
    let habit_id = resolve_habit(session, query)?;
    if session.active_habit_id() != Some(&habit_id) {
        session.select_habit(&habit_id).await?;
    }
    Ok(habit_id)
}

/// Build a target from optional value and period inputs
///
/// A value without a period defaults to a daily target; a period without a
/// value is rejected.
pub fn parse_target(value: Option<f64>, period: Option<&str>) -> Result<Option<Target>, TrackerError> {
    match (value, period) {
        (None, None) => Ok(None),
        (None, Some(_)) => Err(DomainError::Validation {
            message: "A target period needs a target value".to_string(),
        }
        .into()),
        (Some(value), period) => {
            let period = match period {
                Some(p) => p.parse::<Period>()?,
                None => Period::Day,
            };
            Ok(Some(Target::new(value, period)?))
        }
    }
}
