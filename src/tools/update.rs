/// Tools for editing habits and their options
///
/// Renames, target changes, option edits and habit deletion.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, OptionId, Preset};
use crate::format::{format_number, format_number_with_sign};
use crate::session::HabitSession;
use crate::tools::{activate_habit, parse_target, resolve_habit};
use crate::TrackerError;

/// Generic response for edits
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHabitParams {
    pub habit: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub target_value: Option<f64>,
    pub period: Option<String>,
    /// Remove the target entirely
    #[serde(default)]
    pub clear_target: bool,
}

/// Apply a partial edit to a habit and persist the full replacement
pub async fn update_habit(
    session: &mut HabitSession,
    params: UpdateHabitParams,
) -> Result<UpdateResponse, TrackerError> {
    let habit_id = resolve_habit(session, &params.habit)?;
    let mut habit = session
        .habits()
        .iter()
        .find(|h| h.id == habit_id)
        .cloned()
        .ok_or_else(|| DomainError::HabitNotFound(params.habit.clone()))?;

    if params.clear_target && (params.target_value.is_some() || params.period.is_some()) {
        return Err(DomainError::Validation {
            message: "Cannot set and clear a target at the same time".to_string(),
        }
        .into());
    }

    let mut changes = Vec::new();
    if let Some(name) = params.name {
        habit.name = name.trim().to_string();
        changes.push(format!("renamed to '{}'", habit.name));
    }
    if let Some(icon) = params.icon {
        habit.icon = Some(icon).filter(|i| !i.trim().is_empty());
        changes.push("icon updated".to_string());
    }
    if params.clear_target {
        habit.target = None;
        changes.push("target cleared".to_string());
    } else if let Some(target) = parse_target(params.target_value, params.period.as_deref())? {
        habit.target = Some(target);
        changes.push(format!("target set to {} per {}", format_number(target.value), target.period));
    }

    if changes.is_empty() {
        return Ok(UpdateResponse {
            success: false,
            message: "Nothing to update".to_string(),
        });
    }

    session.update_habit_details(&habit).await?;
    Ok(UpdateResponse {
        success: true,
        message: format!("Updated '{}': {}", habit.name, changes.join(", ")),
    })
}

/// Delete a habit with all its options and entries
pub async fn delete_habit(session: &mut HabitSession, habit: &str) -> Result<UpdateResponse, TrackerError> {
    let habit_id = resolve_habit(session, habit)?;
    let name = session
        .habits()
        .iter()
        .find(|h| h.id == habit_id)
        .map(|h| h.name.clone())
        .unwrap_or_default();

    session.remove_habit(&habit_id).await?;
    Ok(UpdateResponse {
        success: true,
        message: format!("🗑️ Deleted habit '{}' and its history", name),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddOptionParams {
    pub habit: String,
    pub label: String,
    pub value: f64,
}

pub async fn add_option(session: &mut HabitSession, params: AddOptionParams) -> Result<UpdateResponse, TrackerError> {
    let habit_id = activate_habit(session, &params.habit).await?;
    let preset = session.add_habit_option(&habit_id, &params.label, params.value).await?;
    Ok(UpdateResponse {
        success: true,
        message: format!("Added option {} {} [{}]", format_number_with_sign(preset.value), preset.label, preset.id),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditOptionParams {
    pub option_id: String,
    pub label: Option<String>,
    pub value: Option<f64>,
}

pub async fn edit_option(session: &mut HabitSession, params: EditOptionParams) -> Result<UpdateResponse, TrackerError> {
    let option_id = parse_option_id(&params.option_id)?;
    let mut option: Preset = session
        .repository()
        .find::<Preset>(&option_id)
        .await?
        .ok_or_else(|| DomainError::OptionNotFound(params.option_id.clone()))?;

    if params.label.is_none() && params.value.is_none() {
        return Ok(UpdateResponse {
            success: false,
            message: "Nothing to update".to_string(),
        });
    }
    if let Some(label) = params.label {
        option.label = label.trim().to_string();
    }
    if let Some(value) = params.value {
        option.value = value;
    }

    session.update_habit_option(&option).await?;
    Ok(UpdateResponse {
        success: true,
        message: format!("Updated option {} {}", format_number_with_sign(option.value), option.label),
    })
}

pub async fn remove_option(session: &mut HabitSession, option_id: &str) -> Result<UpdateResponse, TrackerError> {
    let id = parse_option_id(option_id)?;
    let removed = session.remove_option(&id).await?;
    Ok(UpdateResponse {
        success: removed,
        message: if removed {
            "Removed option".to_string()
        } else {
            format!("No option {}", option_id)
        },
    })
}

fn parse_option_id(raw: &str) -> Result<OptionId, TrackerError> {
    OptionId::from_string(raw).map_err(|_| {
        DomainError::Validation {
            message: format!("Invalid option id '{}'", raw),
        }
        .into()
    })
}
