/// Tools for showing one habit: its options, target progress and history

use serde::{Deserialize, Serialize};

use crate::domain::{Entry, Habit, Preset};
use crate::format::{format_number, format_number_with_sign};
use crate::period::TargetProgress;
use crate::session::HabitSession;
use crate::tools::activate_habit;
use crate::TrackerError;

/// How many entries `show_habit` lists when no limit is given
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowHabitParams {
    pub habit: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ShowHabitResponse {
    pub habit: Habit,
    pub options: Vec<Preset>,
    pub progress: Option<TargetProgress>,
    pub recent_entries: Vec<Entry>,
    pub message: String,
}

/// Select a habit and describe it
pub async fn show_habit(
    session: &mut HabitSession,
    params: ShowHabitParams,
) -> Result<ShowHabitResponse, TrackerError> {
    activate_habit(session, &params.habit).await?;
    let habit = active_habit(session)?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let recent_entries: Vec<Entry> = session.entries().iter().take(limit).cloned().collect();
    let progress = session.target_progress();

    let mut lines = vec![format!(
        "{}{} (total {})",
        habit.icon.as_deref().map(|i| format!("{} ", i)).unwrap_or_default(),
        habit.name,
        format_number(habit.total_count)
    )];

    if let Some(p) = &progress {
        lines.push(format!(
            "Target: {} / {} this {} ({:.0}%){}",
            format_number(p.current),
            format_number(p.target),
            p.period,
            p.fraction * 100.0,
            if p.reached { " 🎯" } else { "" }
        ));
    }

    lines.push("Options:".to_string());
    for option in session.options() {
        lines.push(format!("  {}  {} [{}]", format_number_with_sign(option.value), option.label, option.id));
    }

    lines.push(format!("Recent entries ({} of {}):", recent_entries.len(), session.entries().len()));
    lines.extend(recent_entries.iter().map(describe_entry));

    Ok(ShowHabitResponse {
        habit,
        options: session.options().to_vec(),
        progress,
        recent_entries,
        message: lines.join("\n"),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub habit: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<Entry>,
    pub message: String,
}

/// Entries of a habit, newest first
pub async fn habit_history(
    session: &mut HabitSession,
    params: HistoryParams,
) -> Result<HistoryResponse, TrackerError> {
    activate_habit(session, &params.habit).await?;
    let entries: Vec<Entry> = match params.limit {
        Some(limit) => session.entries().iter().take(limit).cloned().collect(),
        None => session.entries().to_vec(),
    };

    let message = if entries.is_empty() {
        "No entries yet".to_string()
    } else {
        entries.iter().map(describe_entry).collect::<Vec<_>>().join("\n")
    };

    Ok(HistoryResponse { entries, message })
}

fn active_habit(session: &HabitSession) -> Result<Habit, TrackerError> {
    session
        .active_habit()
        .cloned()
        .ok_or_else(|| crate::domain::DomainError::HabitNotFound("(none selected)".to_string()).into())
}

fn describe_entry(entry: &Entry) -> String {
    format!(
        "  {}  {}  {}  [{}]",
        entry.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
        format_number_with_sign(entry.value),
        entry.label,
        entry.id
    )
}
