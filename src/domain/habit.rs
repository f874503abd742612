/// Habit entity and related functionality
///
/// This module defines the Habit struct: a countable activity with a running
/// total and an optional periodic target.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, HabitId, Target};

/// A habit is something the user counts
///
/// `total_count` is a cached sum of every entry value logged against this
/// habit. Every entry mutation must keep it in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Water", "Push-ups")
    pub name: String,
    /// Optional emoji or icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Optional goal per day/week/month/year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Sum of all entry values for this habit
    pub total_count: f64,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with a zero total
    ///
    /// The name is trimmed and validated; an empty icon is treated as none.
    pub fn new(
        name: &str,
        icon: Option<String>,
        target: Option<Target>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(name)?;
        if let Some(target) = &target {
            Target::new(target.value, target.period)?;
        }

        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            icon: icon.filter(|i| !i.trim().is_empty()),
            target,
            total_count: 0.0,
            created_at: Utc::now(),
        })
    }

    /// Check if this habit has a periodic target
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Copy of this habit with `delta` added to its running total
    pub fn with_total_adjusted(&self, delta: f64) -> Self {
        Self {
            total_count: self.total_count + delta,
            ..self.clone()
        }
    }

    /// Validate habit name according to business rules
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }
}
