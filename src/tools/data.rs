/// Tools for bulk data: demo fixture and wiping everything

use serde::Serialize;

use crate::session::HabitSession;
use crate::TrackerError;

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub habit_count: usize,
    pub message: String,
}

/// Replace all data with the demo fixture
pub async fn populate_demo_data(session: &mut HabitSession) -> Result<DataResponse, TrackerError> {
    session.populate_demo_data().await?;
    let habit_count = session.habits().len();
    Ok(DataResponse {
        success: true,
        habit_count,
        message: format!("Loaded demo data with {} habits", habit_count),
    })
}

/// Delete all habits, options and entries
pub async fn clear_all_data(session: &mut HabitSession) -> Result<DataResponse, TrackerError> {
    session.clear_all_data().await?;
    Ok(DataResponse {
        success: true,
        habit_count: 0,
        message: "All data cleared".to_string(),
    })
}
