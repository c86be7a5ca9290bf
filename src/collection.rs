use crate::codec::{decode_snapshot, encode_snapshot};
use crate::database::{KeyValueStore, SNAPSHOT_KEY};
use crate::dlog;
use crate::error::{LogError, NotFound, StoreError, ValidationError};
use crate::input::NewWorkout;
use crate::types::{Workout, workout_id_from_millis};
use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogState {
    Empty,
    Populated,
}

/// The ordered workout collection and the snapshot that backs it.
///
/// Call [`WorkoutLog::restore`] once at startup. Every mutation persists the
/// full collection afterwards, so the snapshot always matches memory.
pub struct WorkoutLog<S: KeyValueStore> {
    store: S,
    workouts: Vec<Workout>,
    restored: bool,
}

impl<S: KeyValueStore> WorkoutLog<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            workouts: Vec::new(),
            restored: false,
        }
    }

    /// Creates the log and restores the snapshot in one go.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let mut log = Self::new(store);
        log.restore()?;
        Ok(log)
    }

    pub fn state(&self) -> LogState {
        if self.workouts.is_empty() {
            LogState::Empty
        } else {
            LogState::Populated
        }
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Workouts in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Read-only view for the front end; same as [`WorkoutLog::workouts`].
    pub fn list_workouts(&self) -> impl ExactSizeIterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Replaces the in-memory collection with the persisted snapshot and
    /// returns how many workouts were loaded.
    ///
    /// A missing snapshot leaves the log empty. So does a corrupted one: it
    /// is logged and ignored, and the next persist overwrites it.
    pub fn restore(&mut self) -> Result<usize, StoreError> {
        let raw = self.store.get(SNAPSHOT_KEY)?;
        self.restored = true;

        if raw.is_none() {
            dlog!("restore: no snapshot under key={SNAPSHOT_KEY}");
        }

        self.workouts = match decode_snapshot(raw.as_deref()) {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!(err = %e, key = SNAPSHOT_KEY, "ignoring corrupted workout snapshot");
                Vec::new()
            }
        };

        tracing::info!(workouts = self.workouts.len(), "restored workouts");
        Ok(self.workouts.len())
    }

    /// Overwrites the snapshot with the full in-memory collection.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let text = encode_snapshot(&self.workouts)?;
        self.store.set(SNAPSHOT_KEY, &text)?;
        dlog!("persisted workouts={}", self.workouts.len());
        Ok(())
    }

    /// Appends a workout and persists. If the write fails the workout is
    /// dropped again, so memory never holds what the snapshot lacks.
    pub fn add(&mut self, workout: Workout) -> Result<&Workout, StoreError> {
        if !self.restored {
            dlog!("add before restore; existing snapshot will be overwritten");
        }
        self.workouts.push(workout);
        if let Err(e) = self.persist() {
            self.workouts.pop();
            return Err(e);
        }
        Ok(&self.workouts[self.workouts.len() - 1])
    }

    pub fn create_workout(&mut self, input: &NewWorkout) -> Result<&Workout, LogError> {
        self.create_workout_at(input, Utc::now())
    }

    /// Validates `input`, builds the record as of `now`, appends and persists.
    /// Invalid input leaves the log untouched.
    pub fn create_workout_at(
        &mut self,
        input: &NewWorkout,
        now: DateTime<Utc>,
    ) -> Result<&Workout, LogError> {
        input.validate().inspect_err(|e: &ValidationError| {
            dlog!("rejected workout input: {e}");
        })?;

        let date = self.unique_id_date(now);
        let workout = Workout::new(date, input);
        tracing::info!(
            id = workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance(),
            duration_min = workout.duration(),
            "created workout"
        );
        Ok(self.add(workout)?)
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Workout, NotFound> {
        self.workouts
            .iter()
            .find(|w| w.id() == id)
            .ok_or_else(|| NotFound { id: id.to_string() })
    }

    /// Records a click on the workout's marker and persists the new count.
    pub fn register_click(&mut self, id: &str) -> Result<u32, LogError> {
        let idx = self
            .workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| NotFound { id: id.to_string() })?;
        let before = self.workouts[idx].click_count();
        let clicks = self.workouts[idx].register_click();
        if let Err(e) = self.persist() {
            self.workouts[idx].set_click_count(before);
            return Err(e.into());
        }
        Ok(clicks)
    }

    /// Drops every workout and the snapshot. Irreversible.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        let n = self.workouts.len();
        self.workouts.clear();
        self.store.remove(SNAPSHOT_KEY)?;
        tracing::info!(workouts = n, "reset all workouts");
        Ok(())
    }

    /// Earliest millisecond at or after `now` whose id is not taken yet.
    fn unique_id_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut date = now;
        while self
            .workouts
            .iter()
            .any(|w| w.id() == workout_id_from_millis(date.timestamp_millis()))
        {
            date += TimeDelta::milliseconds(1);
        }
        date
    }
}
