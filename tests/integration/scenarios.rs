/// End-to-end scenarios through the session and the CLI tools
use std::sync::Arc;

use chrono::{Duration, Utc};
use habit_counter::tools::{self, CreateHabitParams, LogEntryParams, UnlogEntryParams};
use habit_counter::*;

fn memory_session() -> HabitSession {
    HabitSession::new(Repository::new(Arc::new(MemoryStore::new())))
}

#[tokio::test]
async fn water_log_and_delete() {
    let mut session = memory_session();
    let water = session.create_new_habit("Water", None, None).await.unwrap();

    let first = session.log_entry(&water.id, "Glass", 15.0).await.unwrap();
    session.log_entry(&water.id, "Bottle", 25.0).await.unwrap();
    assert_eq!(session.active_habit().unwrap().total_count, 40.0);
    assert_eq!(session.display_total(), Some(40.0));

    assert!(session.remove_entry(&first.id).await.unwrap());
    assert_eq!(session.active_habit().unwrap().total_count, 25.0);
    assert_eq!(session.entries().len(), 1);

    let stored = session.repository().find::<Habit>(&water.id).await.unwrap().unwrap();
    assert_eq!(stored.total_count, 25.0);
}

#[tokio::test]
async fn weekly_target_counts_only_this_week() {
    let mut session = memory_session();
    let target = Target::new(10.0, Period::Week).unwrap();
    let reading = session.create_new_habit("Reading", None, Some(target)).await.unwrap();

    for value in [2.0, 2.0, 3.0] {
        session.log_entry(&reading.id, "Chapter", value).await.unwrap();
    }

    // An old entry written straight to storage, with the total kept in step
    let repo = session.repository().clone();
    let old = Entry::at(reading.id.clone(), "Binge", 100.0, Utc::now() - Duration::days(10));
    repo.add(old).await.unwrap();
    let mut habit = repo.find::<Habit>(&reading.id).await.unwrap().unwrap();
    habit = habit.with_total_adjusted(100.0);
    repo.update(&habit).await.unwrap();

    session.load_habits().await.unwrap();
    session.select_habit(&reading.id).await.unwrap();

    let entries = session.entries().to_vec();
    assert_eq!(entries.len(), 4);
    assert_eq!(period_total(&entries, Period::Week, &Utc::now()), 7.0);
    assert_eq!(session.active_habit().unwrap().total_count, 107.0);
    assert_eq!(session.period_total(), Some(7.0));
    assert_eq!(session.display_total(), Some(7.0));

    let progress = session.target_progress().unwrap();
    assert_eq!(progress.current, 7.0);
    assert!(!progress.reached);
    assert!((progress.fraction - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn last_option_cannot_be_removed() {
    let mut session = memory_session();
    let coffee = session.create_new_habit("Coffee", None, None).await.unwrap();
    let only = session.options()[0].clone();

    let err = session.remove_option(&only.id).await.unwrap_err();
    assert!(matches!(err, TrackerError::Domain(DomainError::LastOption { .. })));

    let stored = session.repository().get_for_habit::<Preset>(&coffee.id).await.unwrap();
    assert_eq!(stored, vec![only]);
}

#[test]
fn number_formatting() {
    assert_eq!(format_number(1234.5), "1\u{202F}234.5");
    assert_eq!(format_number(1000.0), "1\u{202F}000");
    assert_eq!(format_number(0.1 + 0.2), "0.3");
    assert_eq!(format_number_with_sign(-5.0), "-5");
    assert_eq!(format_number_with_sign(5.0), "+5");
}

#[tokio::test]
async fn delete_cascades_to_options_and_entries() {
    let mut session = memory_session();
    let keep = session.create_new_habit("Keep", None, None).await.unwrap();
    session.log_entry(&keep.id, "One", 1.0).await.unwrap();
    let drop = session.create_new_habit("Drop", None, None).await.unwrap();
    session.add_habit_option(&drop.id, "Five", 5.0).await.unwrap();
    session.log_entry(&drop.id, "Five", 5.0).await.unwrap();

    session.remove_habit(&drop.id).await.unwrap();

    let repo = session.repository();
    assert!(repo.get_all::<Preset>().await.unwrap().iter().all(|p| p.habit_id == keep.id));
    assert!(repo.get_all::<Entry>().await.unwrap().iter().all(|e| e.habit_id == keep.id));
    assert_eq!(session.active_habit_id(), Some(&keep.id));
    assert_eq!(session.state(), SessionState::Selected);
}

#[tokio::test]
async fn entries_are_listed_newest_first() {
    let mut session = memory_session();
    let habit = session.create_new_habit("Push-ups", None, None).await.unwrap();
    let repo = session.repository().clone();
    let now = Utc::now();

    // Stored out of order on purpose
    for (label, age) in [("middle", 2), ("oldest", 5), ("newest", 0)] {
        repo.add(Entry::at(habit.id.clone(), label, 1.0, now - Duration::hours(age)))
            .await
            .unwrap();
    }

    session.select_habit(&habit.id).await.unwrap();
    let labels: Vec<&str> = session.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn failed_write_leaves_memory_state_alone() {
    let store = Arc::new(MemoryStore::new());
    let mut session = HabitSession::new(Repository::new(store.clone()));
    let habit = session.create_new_habit("Water", None, None).await.unwrap();

    store.set_simulate_write_error(true);
    assert!(session.log_entry(&habit.id, "Glass", 1.0).await.is_err());
    assert_eq!(session.active_habit().unwrap().total_count, 0.0);
    assert!(session.entries().is_empty());
}

#[tokio::test]
async fn tools_round_trip_by_name() {
    let mut session = memory_session();
    tools::create_habit(
        &mut session,
        CreateHabitParams {
            name: "Water".to_string(),
            target_value: Some(2.0),
            period: Some("day".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let logged = tools::log_entry(
        &mut session,
        LogEntryParams {
            habit: "water".to_string(),
            option: None,
            value: Some(1.5),
            label: Some("Bottle".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(logged.success);
    assert_eq!(logged.total_count, 1.5);

    let entry_id = logged.entry_id;
    let unlogged = tools::unlog_entry(
        &mut session,
        UnlogEntryParams { habit: "Water".to_string(), entry_id },
    )
    .await
    .unwrap();
    assert!(unlogged.success);

    let listed = tools::list_habits(&session).await.unwrap();
    assert_eq!(listed.habits.len(), 1);
    assert_eq!(listed.habits[0].total_count, 0.0);
}
