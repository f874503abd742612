/// Tool for creating new habits

use serde::{Deserialize, Serialize};

use crate::session::HabitSession;
use crate::tools::parse_target;
use crate::TrackerError;

/// Parameters for creating a new habit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHabitParams {
    pub name: String,
    pub icon: Option<String>,
    pub target_value: Option<f64>,
    pub period: Option<String>, // parsed into Period
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: String,
    pub message: String,
}

/// Create a habit and make it the active one
pub async fn create_habit(
    session: &mut HabitSession,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, TrackerError> {
    let target = parse_target(params.target_value, params.period.as_deref())?;
    let habit = session.create_new_habit(&params.name, params.icon, target).await?;

    let target_note = match habit.target {
        Some(target) => format!(" with a target of {} per {}", crate::format_number(target.value), target.period),
        None => String::new(),
    };

    Ok(CreateHabitResponse {
        success: true,
        habit_id: habit.id.to_string(),
        message: format!("✅ Created habit '{}'{}", habit.name, target_note),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::domain::{Period, Preset};
    use crate::repository::Repository;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_create_with_target() {
        let mut session = HabitSession::new(Repository::new(Arc::new(MemoryStore::new())));
        let response = create_habit(
            &mut session,
            CreateHabitParams {
                name: "Reading".to_string(),
                target_value: Some(10.0),
                period: Some("week".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(response.success);
        assert!(response.message.contains("10 per week"));
        let habit = session.active_habit().unwrap();
        assert_eq!(habit.target.unwrap().period, Period::Week);

        let options = session.repository().get_for_habit::<Preset>(&habit.id).await.unwrap();
        assert_eq!(options.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let mut session = HabitSession::new(Repository::new(Arc::new(MemoryStore::new())));
        let result = create_habit(&mut session, CreateHabitParams::default()).await;
        assert!(result.is_err());
        assert!(session.habits().is_empty());
    }
}
