/// Tool for listing habits with their current counts

use chrono::Local;
use serde::Serialize;

use crate::domain::{Entry, Target};
use crate::format::format_number;
use crate::period::display_total;
use crate::session::HabitSession;
use crate::TrackerError;

/// One row of the habit list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub total_count: f64,
    /// Period total for habits with a target, otherwise the total count
    pub display_total: f64,
    pub target: Option<Target>,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

/// List all habits in stored order
///
/// Habits with a target need their entries to compute the period total,
/// so those are read from the repository.
pub async fn list_habits(session: &HabitSession) -> Result<ListHabitsResponse, TrackerError> {
    let now = Local::now();
    let mut habits = Vec::with_capacity(session.habits().len());

    for habit in session.habits() {
        let shown = if habit.has_target() {
            let entries = session.repository().get_for_habit::<Entry>(&habit.id).await?;
            display_total(habit, &entries, &now)
        } else {
            habit.total_count
        };

        habits.push(HabitSummary {
            id: habit.id.to_string(),
            name: habit.name.clone(),
            icon: habit.icon.clone(),
            total_count: habit.total_count,
            display_total: shown,
            target: habit.target,
            active: session.active_habit_id() == Some(&habit.id),
        });
    }

    let message = if habits.is_empty() {
        "No habits yet. Create one with `habit-counter create <name>`.".to_string()
    } else {
        habits
            .iter()
            .map(|h| {
                let marker = if h.active { "*" } else { " " };
                let icon = h.icon.as_deref().map(|i| format!("{} ", i)).unwrap_or_default();
                let goal = match h.target {
                    Some(t) => format!(" / {} per {}", format_number(t.value), t.period),
                    None => String::new(),
                };
                format!("{} {}{}: {}{}", marker, icon, h.name, format_number(h.display_total), goal)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListHabitsResponse { habits, message })
}
