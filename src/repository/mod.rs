/// Typed access to the three stored collections
///
/// Habits, options and entries each live as one JSON array under their own
/// key. Every mutation reads the whole array, transforms it and writes the
/// whole array back. There is no cross-key atomicity: a failure part way
/// through `delete_habit` can leave orphaned options or entries behind.
///
/// Two overlapping mutations of the same collection can lose an update, since
/// the second write is based on a snapshot taken before the first landed.
/// Callers are expected to issue mutations one at a time.

pub mod demo;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Entry, EntryId, Habit, HabitId, OptionId, Preset};
use crate::storage::{KeyValueStore, StorageError};

/// The stored collections and their keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Habits,
    Options,
    Entries,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Habits, Collection::Options, Collection::Entries];

    /// Storage key for this collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Habits => "habits",
            Collection::Options => "options",
            Collection::Entries => "entries",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A value stored in one of the collections
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: PartialEq + fmt::Display + Send + Sync;

    const COLLECTION: Collection;

    fn id(&self) -> &Self::Id;
}

/// A record that belongs to a habit through its `habitId`
pub trait HabitOwned: Record {
    fn habit_id(&self) -> &HabitId;

    /// Order applied by `get_for_habit`; stored order by default
    fn sort_for_habit(_items: &mut [Self]) {}
}

impl Record for Habit {
    type Id = HabitId;
    const COLLECTION: Collection = Collection::Habits;

    fn id(&self) -> &HabitId {
        &self.id
    }
}

impl Record for Preset {
    type Id = OptionId;
    const COLLECTION: Collection = Collection::Options;

    fn id(&self) -> &OptionId {
        &self.id
    }
}

impl HabitOwned for Preset {
    fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }
}

impl Record for Entry {
    type Id = EntryId;
    const COLLECTION: Collection = Collection::Entries;

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl HabitOwned for Entry {
    fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    /// Newest first; `sort_by` is stable so equal timestamps keep stored order
    fn sort_for_habit(items: &mut [Self]) {
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

/// Repository over a key-value store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load a whole collection; an absent key is an empty collection
    pub async fn get_all<T: Record>(&self) -> Result<Vec<T>, StorageError> {
        let key = T::COLLECTION.key();
        match self.store.get(key).await? {
            Some(text) => serde_json::from_str(&text).map_err(|source| {
                StorageError::Serialization { key: key.to_string(), source }
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite a whole collection
    pub async fn save_all<T: Record>(&self, items: &[T]) -> Result<(), StorageError> {
        let key = T::COLLECTION.key();
        let text = serde_json::to_string(items)
            .map_err(|source| StorageError::Serialization { key: key.to_string(), source })?;
        self.store.set(key, &text).await?;
        tracing::debug!("Saved {} {}", items.len(), key);
        Ok(())
    }

    /// Append one record
    pub async fn add<T: Record>(&self, item: T) -> Result<(), StorageError> {
        let mut items = self.get_all::<T>().await?;
        items.push(item);
        self.save_all(&items).await
    }

    /// Replace the record with the same id, keeping its position
    ///
    /// An unknown id is a no-op; returns whether a record was replaced.
    pub async fn update<T: Record>(&self, item: &T) -> Result<bool, StorageError> {
        let mut items = self.get_all::<T>().await?;
        let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) else {
            tracing::debug!("update: no {} record with id {}", T::COLLECTION, item.id());
            return Ok(false);
        };
        *slot = item.clone();
        self.save_all(&items).await?;
        Ok(true)
    }

    /// Remove the record with `id`; returns whether one was removed
    pub async fn delete<T: Record>(&self, id: &T::Id) -> Result<bool, StorageError> {
        let mut items = self.get_all::<T>().await?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            tracing::debug!("delete: no {} record with id {}", T::COLLECTION, id);
            return Ok(false);
        }
        self.save_all(&items).await?;
        Ok(true)
    }

    /// Look up a single record by id
    pub async fn find<T: Record>(&self, id: &T::Id) -> Result<Option<T>, StorageError> {
        Ok(self
            .get_all::<T>()
            .await?
            .into_iter()
            .find(|item| item.id() == id))
    }

    /// Records belonging to `habit_id`, in the record type's display order
    pub async fn get_for_habit<T: HabitOwned>(&self, habit_id: &HabitId) -> Result<Vec<T>, StorageError> {
        let mut items: Vec<T> = self
            .get_all::<T>()
            .await?
            .into_iter()
            .filter(|item| item.habit_id() == habit_id)
            .collect();
        T::sort_for_habit(&mut items);
        Ok(items)
    }

    /// Remove every record belonging to `habit_id`; returns how many went
    pub async fn delete_for_habit<T: HabitOwned>(&self, habit_id: &HabitId) -> Result<usize, StorageError> {
        let mut items = self.get_all::<T>().await?;
        let before = items.len();
        items.retain(|item| item.habit_id() != habit_id);
        let removed = before - items.len();
        self.save_all(&items).await?;
        Ok(removed)
    }

    /// Delete a habit and cascade to its options and entries
    ///
    /// Three independent writes: habits, then options, then entries.
    pub async fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let mut habits = self.get_all::<Habit>().await?;
        habits.retain(|h| &h.id != habit_id);
        self.save_all(&habits).await?;

        let options = self.delete_for_habit::<Preset>(habit_id).await?;
        let entries = self.delete_for_habit::<Entry>(habit_id).await?;

        tracing::debug!(
            "Deleted habit {} with {} options and {} entries",
            habit_id,
            options,
            entries
        );
        Ok(())
    }

    /// Remove all three collections
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        for collection in Collection::ALL {
            self.store.remove(collection.key()).await?;
        }
        tracing::info!("Cleared all stored data");
        Ok(())
    }
}
