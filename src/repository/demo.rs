/// Demo fixture used for onboarding and screenshots
///
/// The habits and options are fixed; entry counts, picks and timestamps are
/// random within the last `DEMO_DAYS` days.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Entry, Habit, HabitId, OptionId, Period, Preset, Target};
use crate::repository::Repository;
use crate::storage::StorageError;

/// How far back demo entries may be dated
pub const DEMO_DAYS: i64 = 60;

struct DemoHabit {
    name: &'static str,
    icon: &'static str,
    target: Option<(f64, Period)>,
    options: &'static [(&'static str, f64)],
}

const DEMO_HABITS: &[DemoHabit] = &[
    DemoHabit {
        name: "Water",
        icon: "💧",
        target: Some((2.0, Period::Day)),
        options: &[("Glass", 0.25), ("Bottle", 0.5), ("Big bottle", 1.0)],
    },
    DemoHabit {
        name: "Push-ups",
        icon: "💪",
        target: Some((100.0, Period::Day)),
        options: &[("Set of 10", 10.0), ("Set of 25", 25.0), ("Oops", -10.0)],
    },
    DemoHabit {
        name: "Reading",
        icon: "📚",
        target: Some((10.0, Period::Week)),
        options: &[("Chapter", 1.0), ("Half chapter", 0.5)],
    },
    DemoHabit {
        name: "Coffee",
        icon: "☕",
        target: None,
        options: &[("Cup", 1.0)],
    },
];

/// Everything written by `populate_demo_data`
#[derive(Debug, Clone, Default)]
pub struct DemoData {
    pub habits: Vec<Habit>,
    pub options: Vec<Preset>,
    pub entries: Vec<Entry>,
}

/// Build the fixture without touching storage
///
/// Only positive options are used for generated entries. Each habit's
/// `total_count` equals the sum of its generated entries.
pub fn build_demo_data<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DemoData {
    let mut data = DemoData::default();

    for demo in DEMO_HABITS {
        let habit_id = HabitId::new();
        let options: Vec<Preset> = demo
            .options
            .iter()
            .map(|(label, value)| Preset {
                id: OptionId::new(),
                habit_id: habit_id.clone(),
                label: label.to_string(),
                value: *value,
            })
            .collect();
        let positive: Vec<&Preset> = options.iter().filter(|o| o.value > 0.0).collect();

        let mut total = 0.0;
        let count = rng.gen_range(10..=30);
        for _ in 0..count {
            let pick = positive[rng.gen_range(0..positive.len())];
            let age = Duration::seconds(rng.gen_range(0..DEMO_DAYS * 24 * 60 * 60));
            data.entries.push(Entry::at(habit_id.clone(), &pick.label, pick.value, now - age));
            total += pick.value;
        }

        data.habits.push(Habit {
            id: habit_id,
            name: demo.name.to_string(),
            icon: Some(demo.icon.to_string()),
            target: demo.target.map(|(value, period)| Target { value, period }),
            total_count: total,
            created_at: now - Duration::days(DEMO_DAYS),
        });
        data.options.extend(options);
    }

    data
}

impl Repository {
    /// Replace all stored data with a freshly generated demo fixture
    pub async fn populate_demo_data(&self) -> Result<DemoData, StorageError> {
        let data = build_demo_data(&mut StdRng::from_entropy(), Utc::now());
        self.write_demo_data(data).await
    }

    /// Same as `populate_demo_data` with a caller-supplied RNG
    pub async fn populate_demo_data_with_rng<R: Rng>(&self, rng: &mut R) -> Result<DemoData, StorageError> {
        let data = build_demo_data(rng, Utc::now());
        self.write_demo_data(data).await
    }

    async fn write_demo_data(&self, data: DemoData) -> Result<DemoData, StorageError> {
        self.clear_all().await?;
        self.save_all(&data.habits).await?;
        self.save_all(&data.options).await?;
        self.save_all(&data.entries).await?;

        tracing::info!(
            "Populated demo data: {} habits, {} options, {} entries",
            data.habits.len(),
            data.options.len(),
            data.entries.len()
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::storage::MemoryStore;

    #[test]
    fn test_fixture_totals_match_entries() {
        let now = Utc::now();
        let data = build_demo_data(&mut StdRng::seed_from_u64(7), now);

        assert_eq!(data.habits.len(), DEMO_HABITS.len());
        for habit in &data.habits {
            let entries: Vec<&Entry> = data.entries.iter().filter(|e| e.habit_id == habit.id).collect();
            assert!((10..=30).contains(&entries.len()));

            let sum: f64 = entries.iter().map(|e| e.value).sum();
            assert!((habit.total_count - sum).abs() < 1e-9);

            for entry in entries {
                assert!(entry.timestamp <= now);
                assert!(entry.timestamp > now - Duration::days(DEMO_DAYS));
                assert!(entry.value > 0.0);
            }
        }
        assert!(data.habits.iter().all(|h| data.options.iter().any(|o| o.habit_id == h.id)));
    }

    #[tokio::test]
    async fn test_populate_replaces_existing_data() {
        let repo = Repository::new(Arc::new(MemoryStore::new()));
        repo.add(Habit::new("Old", None, None).unwrap()).await.unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let data = repo.populate_demo_data_with_rng(&mut rng).await.unwrap();

        let habits = repo.get_all::<Habit>().await.unwrap();
        assert_eq!(habits, data.habits);
        assert!(habits.iter().all(|h| h.name != "Old"));
        assert_eq!(repo.get_all::<Entry>().await.unwrap().len(), data.entries.len());
    }
}
