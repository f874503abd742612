/// Basic integration tests: persistence across reopen for each backend
use std::path::Path;
use std::sync::Arc;

use habit_counter::*;
use tempfile::tempdir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn config_for(backend: BackendKind, dir: &Path) -> Config {
        Config {
            backend,
            data_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    async fn log_some(config: &Config) -> HabitId {
        let mut session = open_session(config).await.expect("Failed to open session");
        assert_eq!(session.state(), SessionState::Unselected);

        let habit = session.create_new_habit("Water", None, None).await.unwrap();
        session.log_entry(&habit.id, "Glass", 0.25).await.unwrap();
        session.log_entry(&habit.id, "Bottle", 1.5).await.unwrap();
        habit.id
    }

    #[tokio::test]
    async fn test_sqlite_session_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_for(BackendKind::Sqlite, dir.path());
        let habit_id = log_some(&config).await;
        assert!(config.database_path().exists());

        let session = open_session(&config).await.expect("Failed to reopen session");
        assert_eq!(session.state(), SessionState::Selected);
        assert_eq!(session.active_habit_id(), Some(&habit_id));
        assert_eq!(session.active_habit().unwrap().total_count, 1.75);
        assert_eq!(session.entries().len(), 2);
        assert_eq!(session.entries()[0].label, "Bottle");
        assert_eq!(session.options()[0].label, DEFAULT_OPTION_LABEL);
    }

    #[tokio::test]
    async fn test_file_session_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_for(BackendKind::File, dir.path());
        let habit_id = log_some(&config).await;

        for key in ["habits", "options", "entries"] {
            assert!(dir.path().join(format!("{}.json", key)).exists());
        }

        let session = open_session(&config).await.expect("Failed to reopen session");
        assert_eq!(session.active_habit_id(), Some(&habit_id));
        assert_eq!(session.active_habit().unwrap().total_count, 1.75);
    }

    #[tokio::test]
    async fn test_memory_backend_starts_empty_every_time() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_for(BackendKind::Memory, dir.path());
        log_some(&config).await;

        let session = open_session(&config).await.unwrap();
        assert!(session.habits().is_empty());
    }

    #[tokio::test]
    async fn test_configured_default_option() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config {
            default_option_label: "Cup".to_string(),
            default_option_value: 2.0,
            ..config_for(BackendKind::File, dir.path())
        };

        let mut session = open_session(&config).await.unwrap();
        session.create_new_habit("Coffee", None, None).await.unwrap();
        assert_eq!(session.options().len(), 1);
        assert_eq!(session.options()[0].label, "Cup");
        assert_eq!(session.options()[0].value, 2.0);
    }

    #[tokio::test]
    async fn test_stored_layout_is_plain_json() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = Arc::new(FileStore::new(dir.path().to_path_buf()));
        let repo = Repository::new(store.clone());

        let habit = Habit::new("Reading", Some("📚".to_string()), None).unwrap();
        repo.add(habit.clone()).await.unwrap();

        let text = store.get("habits").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let stored = &json.as_array().unwrap()[0];
        assert_eq!(stored["id"], habit.id.to_string());
        assert_eq!(stored["name"], "Reading");
        assert_eq!(stored["totalCount"], 0.0);
        assert!(stored["createdAt"].is_string());
        assert!(stored.get("target").is_none());
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.set("habits", "not json").await.unwrap();

        let repo = Repository::new(store);
        let result = repo.get_all::<Habit>().await;
        assert!(matches!(result, Err(StorageError::Serialization { .. })));
    }
}
