/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier newtypes shared by habits, options and
/// entries, plus the target `Period` and `Target` used for periodic goals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new time-ordered id
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Parse an id from its string form
            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_string(s)
            }
        }
    };
}

record_id!(
    /// Unique identifier for a habit
    ///
    /// Wraps a UUIDv7 so ids sort by creation time and can't be mixed up with
    /// option or entry ids.
    HabitId
);

record_id!(
    /// Unique identifier for a quick-entry option
    OptionId
);

record_id!(
    /// Unique identifier for a logged entry
    EntryId
);

/// Time window a target is measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Lowercase name as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            "year" | "yearly" => Ok(Period::Year),
            other => Err(DomainError::Validation {
                message: format!(
                    "Invalid period '{}'. Valid options: day, week, month, year",
                    other
                ),
            }),
        }
    }
}

/// A periodic goal: reach `value` within each `period`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub value: f64,
    pub period: Period,
}

impl Target {
    /// Create a target, rejecting non-positive or non-finite values
    pub fn new(value: f64, period: Period) -> Result<Self, DomainError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::InvalidValue {
                message: "Target value must be a positive number".to_string(),
            });
        }
        Ok(Self { value, period })
    }
}
