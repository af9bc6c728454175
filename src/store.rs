//! Workout Store - ordered workout collection backed by a key-value slot
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──load()──> Loaded ──append()──> Loaded (persisted) ...
//!                              ^                      │
//!                              └──────reset()─────────┘
//! ```
//!
//! The whole collection lives under one key as a JSON array of
//! [`WorkoutRecord`]s. Loading dispatches every record on its `type` tag,
//! so reloaded workouts are real `Running`/`Cycling` values again.

use tracing::{debug, warn};

use crate::input::{Extra, Submission};
use crate::kv::KvStore;
use crate::view::MapFocus;
use crate::workout::{Coords, Cycling, Running, Workout, WorkoutKind, WorkoutRecord};
use crate::{Error, Result};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";

/// Receives the collection whenever it changes, to redraw markers and the list.
///
/// All methods default to no-ops.
pub trait WorkoutListener {
    /// The collection was loaded (possibly empty).
    fn on_loaded(&mut self, _workouts: &[Workout]) {}

    /// `workout` was appended; `workouts` is the full collection after it.
    fn on_appended(&mut self, _workout: &Workout, _workouts: &[Workout]) {}

    /// Persisted data was wiped; reinitialize from an empty state.
    fn on_reset(&mut self) {}
}

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing read from the slot yet.
    Uninitialized,
    /// Collection reflects the slot (plus any appends since).
    Loaded,
}

/// Owns the workout collection and mediates every create, load and save.
pub struct WorkoutStore<S: KvStore> {
    kv: S,
    key: String,
    workouts: Vec<Workout>,
    state: StoreState,
    listener: Option<Box<dyn WorkoutListener>>,
}

impl<S: KvStore> std::fmt::Debug for WorkoutStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutStore")
            .field("key", &self.key)
            .field("workouts", &self.workouts.len())
            .field("state", &self.state)
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: KvStore> WorkoutStore<S> {
    /// Create a store builder.
    #[must_use]
    pub fn builder() -> WorkoutStoreBuilder {
        WorkoutStoreBuilder::default()
    }

    /// Store over `kv` with default settings, not yet loaded.
    #[must_use]
    pub fn new(kv: S) -> Self {
        Self::builder().build(kv)
    }

    /// Store over `kv` with default settings, loaded from the slot.
    #[must_use]
    pub fn open(kv: S) -> Self {
        Self::builder().open(kv)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StoreState {
        self.state
    }

    /// Key the collection is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The backing key-value store.
    #[must_use]
    pub const fn kv(&self) -> &S {
        &self.kv
    }

    /// All workouts in creation order.
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Number of workouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// True when there are no workouts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Replace the collection with what the slot holds.
    ///
    /// A missing, unreadable or corrupt slot gives an empty collection, and
    /// a single corrupt record is dropped while the others load. Both are
    /// logged but never returned as an error.
    pub fn load(&mut self) -> &[Workout] {
        self.workouts = match self.read_slot() {
            Ok(workouts) => workouts,
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable workout data");
                Vec::new()
            }
        };
        self.state = StoreState::Loaded;
        debug!(key = %self.key, count = self.workouts.len(), "loaded workouts");

        if let Some(listener) = self.listener.as_mut() {
            listener.on_loaded(&self.workouts);
        }
        &self.workouts
    }

    // One bad record is skipped; the rest of the slot still loads.
    fn read_slot(&self) -> Result<Vec<Workout>> {
        let Some(bytes) = self.kv.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let values: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;
        let total = values.len();

        let workouts: Vec<Workout> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let restored = serde_json::from_value::<WorkoutRecord>(value)
                    .map_err(Error::from)
                    .and_then(Workout::try_from);
                match restored {
                    Ok(workout) => Some(workout),
                    Err(e) => {
                        warn!(key = %self.key, index, error = %e, "skipping unreadable workout record");
                        None
                    }
                }
            })
            .collect();

        if workouts.len() < total {
            warn!(key = %self.key, kept = workouts.len(), total, "some workout records were skipped");
        }
        Ok(workouts)
    }

    /// Write the whole collection to the slot, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns error if encoding fails or the backend rejects the write.
    pub fn persist(&self) -> Result<()> {
        let records: Vec<WorkoutRecord> = self.workouts.iter().map(WorkoutRecord::from).collect();
        let bytes = serde_json::to_vec(&records)?;
        debug!(key = %self.key, count = records.len(), bytes = bytes.len(), "persisting workouts");
        self.kv.set(&self.key, bytes)
    }

    /// Add a workout at the end of the collection and persist.
    ///
    /// Ids are not checked for duplicates. A store that was never loaded
    /// loads first, so earlier sessions are not overwritten. If persisting
    /// fails the workout stays in memory and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns error if persisting fails.
    pub fn append(&mut self, workout: Workout) -> Result<&Workout> {
        if self.state == StoreState::Uninitialized {
            self.load();
        }
        self.workouts.push(workout);
        let index = self.workouts.len() - 1;

        if let Some(listener) = self.listener.as_mut() {
            listener.on_appended(&self.workouts[index], &self.workouts);
        }
        self.persist()?;
        Ok(&self.workouts[index])
    }

    /// Create the workout described by the form data and append it.
    ///
    /// `extra` is the cadence for running and the elevation gain for
    /// cycling. Numbers are trusted to be validated already.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if `extra` does not belong to `kind`,
    /// or any error from [`append`](Self::append).
    pub fn submit_workout(
        &mut self,
        kind: WorkoutKind,
        distance: f64,
        duration: f64,
        extra: Extra,
        coords: impl Into<Coords>,
    ) -> Result<&Workout> {
        let workout: Workout = match (kind, extra) {
            (WorkoutKind::Running, Extra::Cadence(cadence)) => {
                Running::new(cadence, distance, duration, coords).into()
            }
            (WorkoutKind::Cycling, Extra::ElevationGain(gain)) => {
                Cycling::new(gain, distance, duration, coords).into()
            }
            (kind, extra) => {
                return Err(Error::ContractViolation(format!(
                    "{kind} workout submitted with {} value {}",
                    extra.kind(),
                    extra.value()
                )))
            }
        };
        self.append(workout)
    }

    /// Append a validated form submission.
    ///
    /// # Errors
    ///
    /// See [`submit_workout`](Self::submit_workout).
    pub fn submit(&mut self, submission: Submission) -> Result<&Workout> {
        self.submit_workout(
            submission.kind,
            submission.distance,
            submission.duration,
            submission.extra,
            submission.coords,
        )
    }

    /// Find a workout by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Map position and zoom for a clicked list entry, `None` for unknown ids.
    #[must_use]
    pub fn focus(&self, id: &str) -> Option<MapFocus> {
        self.find_by_id(id).map(MapFocus::on)
    }

    /// Count a selection of the workout and persist the new click count.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or any persistence error.
    pub fn select(&mut self, id: &str) -> Result<&Workout> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        self.workouts[index].click();
        self.persist()?;
        Ok(&self.workouts[index])
    }

    /// Delete the slot, empty the collection and tell the listener to start over.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot delete the slot.
    pub fn reset(&mut self) -> Result<()> {
        self.kv.delete(&self.key)?;
        self.workouts.clear();
        self.state = StoreState::Loaded;
        debug!(key = %self.key, "reset workouts");

        if let Some(listener) = self.listener.as_mut() {
            listener.on_reset();
        }
        Ok(())
    }
}

/// Builder for `WorkoutStore`.
#[derive(Default)]
pub struct WorkoutStoreBuilder {
    key: Option<String>,
    listener: Option<Box<dyn WorkoutListener>>,
}

impl std::fmt::Debug for WorkoutStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutStoreBuilder")
            .field("key", &self.key)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl WorkoutStoreBuilder {
    /// Persist under `key` instead of [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Notify `listener` on load, append and reset.
    #[must_use]
    pub fn listener(mut self, listener: impl WorkoutListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Build the store without touching the slot.
    #[must_use]
    pub fn build<S: KvStore>(self, kv: S) -> WorkoutStore<S> {
        WorkoutStore {
            kv,
            key: self.key.unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            workouts: Vec::new(),
            state: StoreState::Uninitialized,
            listener: self.listener,
        }
    }

    /// Build the store and load it.
    #[must_use]
    pub fn open<S: KvStore>(self, kv: S) -> WorkoutStore<S> {
        let mut store = self.build(kv);
        store.load();
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    #[test]
    fn test_store_default() {
        let store = WorkoutStore::new(MemoryKvStore::new());

        assert!(store.is_empty());
        assert_eq!(store.state(), StoreState::Uninitialized);
        assert_eq!(store.storage_key(), DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_load_without_slot_is_empty() {
        let mut store = WorkoutStore::new(MemoryKvStore::new());

        assert!(store.load().is_empty());
        assert_eq!(store.state(), StoreState::Loaded);
    }

    #[test]
    fn test_submit_running_scenario() {
        let mut store = WorkoutStore::open(MemoryKvStore::new());

        let run = store
            .submit_workout(WorkoutKind::Running, 5.0, 30.0, Extra::Cadence(150.0), [10.0, 10.0])
            .unwrap();

        assert_eq!(run.as_running().unwrap().pace(), 6.0);
        assert!(run.description().starts_with("Running on "));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_submit_cycling_persists() {
        let kv = MemoryKvStore::new();
        let mut store = WorkoutStore::open(kv.clone());

        let ride = store
            .submit_workout(
                WorkoutKind::Cycling,
                20.0,
                60.0,
                Extra::ElevationGain(200.0),
                [5.0, 5.0],
            )
            .unwrap();

        assert_eq!(ride.as_cycling().unwrap().speed(), 20.0 / 60.0);
        assert_eq!(store.len(), 1);
        assert!(!kv.get(DEFAULT_STORAGE_KEY).unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_submit_mismatched_extra() {
        let mut store = WorkoutStore::open(MemoryKvStore::new());

        let err = store
            .submit_workout(WorkoutKind::Running, 5.0, 30.0, Extra::ElevationGain(10.0), [0.0, 0.0])
            .unwrap_err();

        assert!(matches!(err, Error::ContractViolation(_)));
        assert!(err.to_string().contains("running workout submitted with cycling value 10"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let mut store = WorkoutStore::open(MemoryKvStore::new());
        let id = store
            .append(Workout::running(150.0, 5.0, 30.0, [1.0, 1.0]))
            .unwrap()
            .id()
            .to_string();
        store
            .append(Workout::cycling(0.0, 10.0, 20.0, [2.0, 2.0]))
            .unwrap();

        assert_eq!(store.find_by_id(&id).unwrap().coords(), Coords::new(1.0, 1.0));
        assert!(store.find_by_id("missing").is_none());
        assert!(store.focus("missing").is_none());
    }

    #[test]
    fn test_append_before_load_keeps_previous_session() {
        let kv = MemoryKvStore::new();
        let mut first = WorkoutStore::open(kv.clone());
        first
            .append(Workout::running(150.0, 5.0, 30.0, [1.0, 1.0]))
            .unwrap();

        let mut second = WorkoutStore::new(kv);
        second
            .append(Workout::cycling(0.0, 10.0, 20.0, [2.0, 2.0]))
            .unwrap();

        assert_eq!(second.len(), 2);
        assert_eq!(second.workouts()[0].kind(), WorkoutKind::Running);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let kv = MemoryKvStore::new();
        kv.set(DEFAULT_STORAGE_KEY, b"{not json".to_vec()).unwrap();

        let store = WorkoutStore::open(kv);

        assert!(store.is_empty());
        assert_eq!(store.state(), StoreState::Loaded);
    }

    #[test]
    fn test_select_counts_clicks() {
        let mut store = WorkoutStore::open(MemoryKvStore::new());
        let id = store
            .append(Workout::running(150.0, 5.0, 30.0, [1.0, 1.0]))
            .unwrap()
            .id()
            .to_string();

        store.select(&id).unwrap();
        assert_eq!(store.select(&id).unwrap().clicks(), 2);
        assert!(matches!(store.select("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_corrupt_record_is_skipped() {
        let kv = MemoryKvStore::new();
        let mut first = WorkoutStore::open(kv.clone());
        let kept = first
            .append(Workout::running(150.0, 5.0, 30.0, [1.0, 1.0]))
            .unwrap()
            .clone();

        let mut json: Vec<serde_json::Value> =
            serde_json::from_slice(&kv.get(DEFAULT_STORAGE_KEY).unwrap().unwrap()).unwrap();
        json.push(serde_json::json!({"id": "broken", "type": "cycling"}));
        kv.set(DEFAULT_STORAGE_KEY, serde_json::to_vec(&json).unwrap())
            .unwrap();

        let reopened = WorkoutStore::open(kv);

        assert_eq!(reopened.workouts(), &[kept]);
    }

    /// Backend that reads from memory but rejects every write.
    #[derive(Default)]
    struct ReadOnlyKv {
        inner: MemoryKvStore,
    }

    impl KvStore for ReadOnlyKv {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
            Err(Error::StorageError("read-only backend".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Err(Error::StorageError("read-only backend".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct AppendCounter(std::rc::Rc<std::cell::Cell<usize>>);

    impl WorkoutListener for AppendCounter {
        fn on_appended(&mut self, _workout: &Workout, _workouts: &[Workout]) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_append_keeps_workout_when_persist_fails() {
        let counter = AppendCounter::default();
        let mut store = WorkoutStore::<ReadOnlyKv>::builder()
            .listener(counter.clone())
            .open(ReadOnlyKv::default());

        let err = store
            .append(Workout::running(150.0, 5.0, 30.0, [1.0, 1.0]))
            .unwrap_err();

        assert!(matches!(err, Error::StorageError(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(counter.0.get(), 1);
        assert_eq!(store.kv().inner.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_select_and_reset_propagate_backend_errors() {
        let mut store = WorkoutStore::open(ReadOnlyKv::default());
        let _ = store.append(Workout::cycling(10.0, 20.0, 60.0, [2.0, 2.0]));
        let id = store.workouts()[0].id().to_string();

        assert!(matches!(store.select(&id), Err(Error::StorageError(_))));
        assert_eq!(store.workouts()[0].clicks(), 1);

        assert!(matches!(store.reset(), Err(Error::StorageError(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_custom_storage_key() {
        let kv = MemoryKvStore::new();
        let mut store = WorkoutStore::<MemoryKvStore>::builder()
            .storage_key("mapty")
            .open(kv.clone());

        store
            .append(Workout::running(150.0, 5.0, 30.0, [1.0, 1.0]))
            .unwrap();

        assert!(kv.exists("mapty").unwrap());
        assert!(!kv.exists(DEFAULT_STORAGE_KEY).unwrap());
    }
}
