/// Entry entity: one logged increment
///
/// Entries are immutable history. Deleting one must reverse its effect on the
/// parent habit's total.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{EntryId, HabitId};

/// A record of one logging action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Which habit this entry is for
    pub habit_id: HabitId,
    /// Label copied from the option used
    #[serde(default)]
    pub label: String,
    /// Amount added to the habit's total (may be negative)
    pub value: f64,
    /// When this entry was logged
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    /// Create an entry stamped with the current time
    pub fn new(habit_id: HabitId, label: &str, value: f64) -> Self {
        Self::at(habit_id, label, value, Utc::now())
    }

    /// Create an entry with an explicit timestamp (imports, demo data)
    pub fn at(habit_id: HabitId, label: &str, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            habit_id,
            label: label.to_string(),
            value,
            timestamp,
        }
    }
}
