/// Basic unit tests to verify core functionality through the public API
use habit_counter::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new("Test Habit", Some("🏋️".to_string()), None);

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.total_count, 0.0);
    }

    #[test]
    fn test_option_creation() {
        let habit_id = HabitId::new();
        let preset = Preset::new(habit_id.clone(), "Glass", 0.25).unwrap();
        assert_eq!(preset.habit_id, habit_id);
        assert!(Preset::new(habit_id, "Nothing", 0.0).is_err());
    }

    #[test]
    fn test_entry_json_layout() {
        let entry = Entry::new(HabitId::new(), "Glass", 0.25);
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("habitId").is_some());
        assert_eq!(json["label"], "Glass");
        assert_eq!(json["value"], 0.25);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(Collection::Habits.key(), "habits");
        assert_eq!(Collection::Options.key(), "options");
        assert_eq!(Collection::Entries.key(), "entries");
    }

    #[test]
    fn test_formatting_scenario() {
        assert_eq!(format_number(1234.5), "1\u{202F}234.5");
        assert_eq!(format_number(1000.0), "1\u{202F}000");
        assert_eq!(format_number_with_sign(-5.0), "-5");
        assert_eq!(format_number_with_sign(5.0), "+5");
    }

    #[test]
    fn test_memory_store_creation() {
        let store = MemoryStore::new();
        let value = tokio_test::block_on(store.get("habits")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_sqlite_store_creation() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = SqliteStore::new(dir.path().join("habits.db"));
        assert!(storage.is_ok());
    }
}
