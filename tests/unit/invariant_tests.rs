/// Properties that must hold after any sequence of operations
use std::sync::Arc;

use habit_counter::*;

fn memory_session() -> (Arc<MemoryStore>, HabitSession) {
    let store = Arc::new(MemoryStore::new());
    let session = HabitSession::new(Repository::new(store.clone()));
    (store, session)
}

async fn stored_sum(repo: &Repository, habit_id: &HabitId) -> f64 {
    repo.get_for_habit::<Entry>(habit_id)
        .await
        .unwrap()
        .iter()
        .map(|e| e.value)
        .sum()
}

#[tokio::test]
async fn total_count_matches_entry_sum() {
    let (_, mut session) = memory_session();
    let a = session.create_new_habit("A", None, None).await.unwrap();
    let b = session.create_new_habit("B", None, None).await.unwrap();

    let values = [3.0, -1.0, 0.1, 0.2, 12.5, -0.75, 7.0];
    let mut logged = Vec::new();
    for (i, value) in values.iter().enumerate() {
        let target = if i % 2 == 0 { &a.id } else { &b.id };
        logged.push(session.log_entry(target, "x", *value).await.unwrap());
    }

    // B is active, so only B's entries can be removed through the session
    for entry in logged.iter().filter(|e| e.habit_id == b.id).take(2) {
        assert!(session.remove_entry(&entry.id).await.unwrap());
    }

    let repo = session.repository().clone();
    for habit in repo.get_all::<Habit>().await.unwrap() {
        let sum = stored_sum(&repo, &habit.id).await;
        assert!(
            (habit.total_count - sum).abs() < 1e-9,
            "{}: total {} vs entries {}",
            habit.name,
            habit.total_count,
            sum
        );
    }
}

#[tokio::test]
async fn every_loaded_habit_has_an_option() {
    let (_, mut session) = memory_session();
    let repo = session.repository().clone();
    let habits = vec![
        Habit::new("One", None, None).unwrap(),
        Habit::new("Two", None, None).unwrap(),
    ];
    repo.save_all(&habits).await.unwrap();

    session.load_habits().await.unwrap();
    for habit in &habits {
        session.select_habit(&habit.id).await.unwrap();
    }

    for habit in &habits {
        assert!(!repo.get_for_habit::<Preset>(&habit.id).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn update_is_idempotent() {
    let (store, session) = memory_session();
    let repo = session.repository().clone();
    let habit = Habit::new("Reading", None, None).unwrap();
    repo.add(habit.clone()).await.unwrap();
    repo.add(Habit::new("Other", None, None).unwrap()).await.unwrap();

    let mut renamed = habit.clone();
    renamed.name = "Books".to_string();

    repo.update(&renamed).await.unwrap();
    let once = store.raw("habits").unwrap();
    repo.update(&renamed).await.unwrap();
    let twice = store.raw("habits").unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn save_all_of_get_all_is_a_no_op() {
    let (store, session) = memory_session();
    let repo = session.repository().clone();
    repo.populate_demo_data().await.unwrap();

    let before: Vec<String> = Collection::ALL.iter().map(|c| store.raw(c.key()).unwrap()).collect();

    let habits = repo.get_all::<Habit>().await.unwrap();
    repo.save_all(&habits).await.unwrap();
    let options = repo.get_all::<Preset>().await.unwrap();
    repo.save_all(&options).await.unwrap();
    let entries = repo.get_all::<Entry>().await.unwrap();
    repo.save_all(&entries).await.unwrap();

    let after: Vec<String> = Collection::ALL.iter().map(|c| store.raw(c.key()).unwrap()).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn fractional_entries_drift_but_display_rounds() {
    let (_, mut session) = memory_session();
    let water = session.create_new_habit("Water", None, None).await.unwrap();

    for _ in 0..10 {
        session.log_entry(&water.id, "Sip", 0.1).await.unwrap();
    }

    let total = session.active_habit().unwrap().total_count;
    // Plain float addition: 0.1 ten times is not exactly 1
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(format_number(total), "1");
}
