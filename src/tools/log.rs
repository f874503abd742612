/// Tools for logging and unlogging entries

use serde::{Deserialize, Serialize};

use crate::domain::{validate_amount, validate_label, DomainError, EntryId};
use crate::format::{format_number, format_number_with_sign};
use crate::session::HabitSession;
use crate::tools::activate_habit;
use crate::TrackerError;

/// Parameters for logging an entry
///
/// Pick an option by label, or give a custom value (with an optional label).
/// With neither, the habit's first option is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEntryParams {
    pub habit: String,
    pub option: Option<String>,
    pub value: Option<f64>,
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogEntryResponse {
    pub success: bool,
    pub entry_id: String,
    pub total_count: f64,
    pub display_total: f64,
    pub message: String,
}

/// Log an entry against a habit
pub async fn log_entry(
    session: &mut HabitSession,
    params: LogEntryParams,
) -> Result<LogEntryResponse, TrackerError> {
    let habit_id = activate_habit(session, &params.habit).await?;

    let (label, value) = match (params.option, params.value) {
        (Some(_), Some(_)) => {
            return Err(DomainError::Validation {
                message: "Use either an option or a custom value, not both".to_string(),
            }
            .into());
        }
        (Some(wanted), None) => {
            let wanted = wanted.trim().to_lowercase();
            let option = session
                .options()
                .iter()
                .find(|o| o.label.to_lowercase() == wanted)
                .ok_or_else(|| DomainError::OptionNotFound(wanted.clone()))?;
            (option.label.clone(), option.value)
        }
        (None, Some(value)) => {
            validate_amount(value)?;
            let label = params.label.unwrap_or_else(|| format_number_with_sign(value));
            validate_label(&label)?;
            (label, value)
        }
        (None, None) => {
            let option = session
                .options()
                .first()
                .ok_or_else(|| DomainError::OptionNotFound("(none)".to_string()))?;
            (option.label.clone(), option.value)
        }
    };

    let entry = session.log_entry(&habit_id, &label, value).await?;
    let total_count = session.active_habit().map_or(0.0, |h| h.total_count);
    let display_total = session.display_total().unwrap_or(total_count);

    Ok(LogEntryResponse {
        success: true,
        entry_id: entry.id.to_string(),
        total_count,
        display_total,
        message: format!(
            "Logged {} ({}), now at {}",
            format_number_with_sign(value),
            label,
            format_number(display_total)
        ),
    })
}

/// Parameters for removing a logged entry
#[derive(Debug, Clone, Deserialize)]
pub struct UnlogEntryParams {
    pub habit: String,
    pub entry_id: String,
}

#[derive(Debug, Serialize)]
pub struct UnlogEntryResponse {
    pub success: bool,
    pub total_count: f64,
    pub message: String,
}

/// Remove an entry and reverse its effect on the habit's total
///
/// The habit is selected first so its entries are loaded.
pub async fn unlog_entry(
    session: &mut HabitSession,
    params: UnlogEntryParams,
) -> Result<UnlogEntryResponse, TrackerError> {
    let entry_id = EntryId::from_string(&params.entry_id).map_err(|_| DomainError::Validation {
        message: format!("Invalid entry id '{}'", params.entry_id),
    })?;
    activate_habit(session, &params.habit).await?;

    let removed = session.remove_entry(&entry_id).await?;
    let total_count = session.active_habit().map_or(0.0, |h| h.total_count);

    let message = if removed {
        format!("Removed entry, total is now {}", format_number(total_count))
    } else {
        format!("No entry {} on this habit", params.entry_id)
    };

    Ok(UnlogEntryResponse {
        success: removed,
        total_count,
        message,
    })
}
