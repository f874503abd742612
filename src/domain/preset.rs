/// Quick-entry options for a habit
///
/// Stored under the `options` key. The Rust type is `Preset` so it doesn't
/// shadow `std::option::Option`.

use serde::{Deserialize, Serialize};
use crate::domain::{validate_amount, validate_label, DomainError, HabitId, OptionId};

/// Label used for the option created automatically for a habit with none
pub const DEFAULT_OPTION_LABEL: &str = "One Unit";

/// Value used for the option created automatically for a habit with none
pub const DEFAULT_OPTION_VALUE: f64 = 1.0;

/// A preset increment (or decrement) the user can log with one action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: OptionId,
    pub habit_id: HabitId,
    pub label: String,
    pub value: f64,
}

impl Preset {
    /// Create a validated option for `habit_id`
    pub fn new(habit_id: HabitId, label: &str, value: f64) -> Result<Self, DomainError> {
        validate_label(label)?;
        validate_amount(value)?;

        Ok(Self {
            id: OptionId::new(),
            habit_id,
            label: label.trim().to_string(),
            value,
        })
    }

    /// Option created when a habit is found with no options at all
    pub fn default_for(habit_id: HabitId) -> Self {
        Self {
            id: OptionId::new(),
            habit_id,
            label: DEFAULT_OPTION_LABEL.to_string(),
            value: DEFAULT_OPTION_VALUE,
        }
    }
}
