/// In-memory session over the repository
///
/// `HabitSession` keeps the habit list plus one active habit's options and
/// entries, and publishes a `SessionSnapshot` to subscribers after every
/// change. Logging and unlogging update totals in place instead of
/// refetching every collection.

use chrono::Local;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{
    validate_amount, validate_label, DomainError, Entry, EntryId, Habit, HabitId, OptionId, Preset,
    Target, DEFAULT_OPTION_LABEL, DEFAULT_OPTION_VALUE,
};
use crate::period::{self, TargetProgress};
use crate::repository::Repository;
use crate::TrackerError;

/// Where the session is in selecting a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No active habit; options and entries are empty
    #[default]
    Unselected,
    /// Options and entries for the active habit are being fetched
    Loading,
    /// Options and entries are loaded for the active habit
    Selected,
}

/// Everything an observer needs to render the session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub habits: Vec<Habit>,
    pub active_habit_id: Option<HabitId>,
    pub options: Vec<Preset>,
    pub entries: Vec<Entry>,
}

impl SessionSnapshot {
    pub fn active_habit(&self) -> Option<&Habit> {
        let id = self.active_habit_id.as_ref()?;
        self.habits.iter().find(|h| &h.id == id)
    }
}

pub struct HabitSession {
    repo: Repository,
    default_option_label: String,
    default_option_value: f64,
    habits: Vec<Habit>,
    active_habit_id: Option<HabitId>,
    options: Vec<Preset>,
    entries: Vec<Entry>,
    state: SessionState,
    notifier: watch::Sender<SessionSnapshot>,
}

impl HabitSession {
    /// Create an empty, unloaded session
    pub fn new(repo: Repository) -> Self {
        let (notifier, _) = watch::channel(SessionSnapshot::default());
        Self {
            repo,
            default_option_label: DEFAULT_OPTION_LABEL.to_string(),
            default_option_value: DEFAULT_OPTION_VALUE,
            habits: Vec::new(),
            active_habit_id: None,
            options: Vec::new(),
            entries: Vec::new(),
            state: SessionState::Unselected,
            notifier,
        }
    }

    /// Override the option created for habits that have none
    pub fn with_default_option(mut self, label: impl Into<String>, value: f64) -> Self {
        self.default_option_label = label.into();
        self.default_option_value = value;
        self
    }

    /// Create a session and run the initial load
    ///
    /// A failed initial load is logged and leaves the session empty rather
    /// than failing.
    pub async fn open(repo: Repository) -> Self {
        let mut session = Self::new(repo);
        session.initial_load().await;
        session
    }

    /// Run the initial load on a session built with `new`
    pub async fn initial_load(&mut self) {
        if let Err(err) = self.load_habits().await {
            warn!("Failed to load habits: {}", err);
        }
    }

    // --- Accessors ---

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn active_habit_id(&self) -> Option<&HabitId> {
        self.active_habit_id.as_ref()
    }

    pub fn active_habit(&self) -> Option<&Habit> {
        let id = self.active_habit_id.as_ref()?;
        self.habits.iter().find(|h| &h.id == id)
    }

    /// Options of the active habit, in stored order
    pub fn options(&self) -> &[Preset] {
        &self.options
    }

    /// Entries of the active habit, newest first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            habits: self.habits.clone(),
            active_habit_id: self.active_habit_id.clone(),
            options: self.options.clone(),
            entries: self.entries.clone(),
        }
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.notifier.subscribe()
    }

    fn notify(&self) {
        self.notifier.send_replace(self.snapshot());
    }

    // --- Habits ---

    /// Reload all habits and make sure a valid habit is active
    ///
    /// With no habits the session becomes unselected. If nothing is active,
    /// or the active habit disappeared, the first stored habit is selected.
    pub async fn load_habits(&mut self) -> Result<(), TrackerError> {
        self.habits = self.repo.get_all::<Habit>().await?;
        debug!("Loaded {} habits", self.habits.len());

        let active_exists = self
            .active_habit_id
            .as_ref()
            .is_some_and(|id| self.habits.iter().any(|h| &h.id == id));

        if self.habits.is_empty() {
            self.clear_selection();
        } else if !active_exists {
            let first = self.habits[0].id.clone();
            return self.select_habit(&first).await;
        }

        self.notify();
        Ok(())
    }

    /// Make `habit_id` active and load its options and entries
    ///
    /// A habit found with no options gets the default option first.
    pub async fn select_habit(&mut self, habit_id: &HabitId) -> Result<(), TrackerError> {
        if !self.habits.iter().any(|h| &h.id == habit_id) {
            return Err(DomainError::HabitNotFound(habit_id.to_string()).into());
        }

        let previous = (self.active_habit_id.clone(), self.state);
        self.active_habit_id = Some(habit_id.clone());
        self.state = SessionState::Loading;
        self.notify();

        match self.fetch_habit_data(habit_id).await {
            Ok((options, entries)) => {
                self.options = options;
                self.entries = entries;
                self.state = SessionState::Selected;
                debug!(
                    "Selected habit {} ({} options, {} entries)",
                    habit_id,
                    self.options.len(),
                    self.entries.len()
                );
                self.notify();
                Ok(())
            }
            Err(err) => {
                (self.active_habit_id, self.state) = previous;
                self.notify();
                Err(err)
            }
        }
    }

    async fn fetch_habit_data(&self, habit_id: &HabitId) -> Result<(Vec<Preset>, Vec<Entry>), TrackerError> {
        let (mut options, entries) = futures::try_join!(
            self.repo.get_for_habit::<Preset>(habit_id),
            self.repo.get_for_habit::<Entry>(habit_id),
        )?;

        if options.is_empty() {
            if let Some(created) = self.ensure_default_option(habit_id).await? {
                options.push(created);
            }
        }
        Ok((options, entries))
    }

    /// Give `habit_id` the default option if it has no options at all
    ///
    /// Returns the option it created, or `None` if the habit already had one.
    pub async fn ensure_default_option(&self, habit_id: &HabitId) -> Result<Option<Preset>, TrackerError> {
        let existing = self.repo.get_for_habit::<Preset>(habit_id).await?;
        if !existing.is_empty() {
            return Ok(None);
        }

        let preset = Preset {
            id: OptionId::new(),
            habit_id: habit_id.clone(),
            label: self.default_option_label.clone(),
            value: self.default_option_value,
        };
        self.repo.add(preset.clone()).await?;
        debug!("Created default option for habit {}", habit_id);
        Ok(Some(preset))
    }

    /// Create, persist and select a new habit
    pub async fn create_new_habit(
        &mut self,
        name: &str,
        icon: Option<String>,
        target: Option<Target>,
    ) -> Result<Habit, TrackerError> {
        let habit = Habit::new(name, icon, target)?;
        self.repo.add(habit.clone()).await?;
        info!("Created habit '{}' ({})", habit.name, habit.id);

        self.load_habits().await?;
        self.select_habit(&habit.id).await?;
        Ok(habit)
    }

    /// Persist a full replacement of a habit and reload the list
    pub async fn update_habit_details(&mut self, habit: &Habit) -> Result<(), TrackerError> {
        Habit::validate_name(&habit.name)?;
        if let Some(target) = &habit.target {
            Target::new(target.value, target.period)?;
        }

        if !self.repo.update(habit).await? {
            warn!("update_habit_details: habit {} not found", habit.id);
        }
        self.load_habits().await
    }

    /// Delete a habit with its options and entries
    ///
    /// If it was active the selection is cleared before reloading, so the
    /// first remaining habit (if any) becomes active.
    pub async fn remove_habit(&mut self, habit_id: &HabitId) -> Result<(), TrackerError> {
        self.repo.delete_habit(habit_id).await?;
        info!("Removed habit {}", habit_id);

        if self.active_habit_id.as_ref() == Some(habit_id) {
            self.clear_selection();
        }
        self.load_habits().await
    }

    fn clear_selection(&mut self) {
        self.active_habit_id = None;
        self.options.clear();
        self.entries.clear();
        self.state = SessionState::Unselected;
    }

    // --- Options ---

    pub async fn add_habit_option(
        &mut self,
        habit_id: &HabitId,
        label: &str,
        value: f64,
    ) -> Result<Preset, TrackerError> {
        let preset = Preset::new(habit_id.clone(), label, value)?;
        self.repo.add(preset.clone()).await?;
        self.refresh_options_if_active(habit_id).await?;
        Ok(preset)
    }

    pub async fn update_habit_option(&mut self, option: &Preset) -> Result<(), TrackerError> {
        validate_label(&option.label)?;
        validate_amount(option.value)?;

        if !self.repo.update(option).await? {
            warn!("update_habit_option: option {} not found", option.id);
        }
        self.refresh_options_if_active(&option.habit_id).await
    }

    /// Delete an option unless it is its habit's last one
    ///
    /// Returns `Ok(false)` for an unknown id.
    pub async fn remove_option(&mut self, option_id: &OptionId) -> Result<bool, TrackerError> {
        let Some(option) = self.repo.find::<Preset>(option_id).await? else {
            debug!("remove_option: option {} not found", option_id);
            return Ok(false);
        };

        let siblings = self.repo.get_for_habit::<Preset>(&option.habit_id).await?;
        if siblings.len() <= 1 {
            return Err(DomainError::LastOption {
                habit_id: option.habit_id.to_string(),
            }
            .into());
        }

        self.repo.delete::<Preset>(option_id).await?;
        self.refresh_options_if_active(&option.habit_id).await?;
        Ok(true)
    }

    async fn refresh_options_if_active(&mut self, habit_id: &HabitId) -> Result<(), TrackerError> {
        if self.active_habit_id.as_ref() == Some(habit_id) {
            self.options = self.repo.get_for_habit::<Preset>(habit_id).await?;
            self.notify();
        }
        Ok(())
    }

    // --- Entries ---

    /// Log `value` against a habit and bump its running total
    pub async fn log_entry(&mut self, habit_id: &HabitId, label: &str, value: f64) -> Result<Entry, TrackerError> {
        validate_amount(value)?;
        let habit = self
            .habits
            .iter()
            .find(|h| &h.id == habit_id)
            .cloned()
            .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))?;

        let entry = Entry::new(habit_id.clone(), label, value);
        self.repo.add(entry.clone()).await?;

        let updated = habit.with_total_adjusted(value);
        self.repo.update(&updated).await?;
        debug!("Logged {} on habit {} (total {})", value, habit_id, updated.total_count);

        self.replace_habit(updated);
        if self.active_habit_id.as_ref() == Some(habit_id) {
            // New entries are always the newest
            self.entries.insert(0, entry.clone());
        }
        self.notify();
        Ok(entry)
    }

    /// Delete one of the active habit's entries and reverse its value
    ///
    /// Only entries currently loaded for the active habit can be removed;
    /// any other id is a no-op returning `Ok(false)`.
    pub async fn remove_entry(&mut self, entry_id: &EntryId) -> Result<bool, TrackerError> {
        let Some(entry) = self.entries.iter().find(|e| &e.id == entry_id).cloned() else {
            debug!("remove_entry: entry {} is not loaded", entry_id);
            return Ok(false);
        };

        self.repo.delete::<Entry>(entry_id).await?;

        if let Some(habit) = self.active_habit().cloned() {
            let updated = habit.with_total_adjusted(-entry.value);
            self.repo.update(&updated).await?;
            self.replace_habit(updated);
        }
        self.entries.retain(|e| &e.id != entry_id);
        self.notify();
        Ok(true)
    }

    fn replace_habit(&mut self, updated: Habit) {
        if let Some(slot) = self.habits.iter_mut().find(|h| h.id == updated.id) {
            *slot = updated;
        }
    }

    // --- Derived values ---

    /// Sum of the active habit's entries in its target period, in local time
    ///
    /// `None` when nothing is active or the habit has no target.
    pub fn period_total(&self) -> Option<f64> {
        let target = self.active_habit()?.target?;
        Some(period::period_total(&self.entries, target.period, &Local::now()))
    }

    /// Count to display for the active habit in local time
    pub fn display_total(&self) -> Option<f64> {
        let habit = self.active_habit()?;
        Some(period::display_total(habit, &self.entries, &Local::now()))
    }

    /// Progress towards the active habit's target in local time
    pub fn target_progress(&self) -> Option<TargetProgress> {
        let habit = self.active_habit()?;
        period::target_progress(habit, &self.entries, &Local::now())
    }

    // --- Bulk data ---

    /// Replace all data with the demo fixture and select its first habit
    pub async fn populate_demo_data(&mut self) -> Result<(), TrackerError> {
        self.repo.populate_demo_data().await?;
        self.clear_selection();
        self.load_habits().await
    }

    /// Delete everything and return to the unselected state
    pub async fn clear_all_data(&mut self) -> Result<(), TrackerError> {
        self.repo.clear_all().await?;
        self.clear_selection();
        self.load_habits().await
    }
}
