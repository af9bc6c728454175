//! # workout-tracker: map-based running and cycling log
//!
//! The domain core of a workout tracker where the user clicks a spot on a
//! map, records a run or a ride there, and finds the list again on the next
//! visit.
//!
//! ## Modules
//!
//! - [`workout`]: `Running` / `Cycling` variants with cached pace, speed and description
//! - [`store`]: ordered collection, persisted to a key-value slot and rebuilt per variant on load
//! - [`kv`]: key-value slot backends (in-memory and on-disk)
//! - [`input`]: validation of raw form input before it reaches the store
//! - [`view`]: icons, popup text and list rows for the UI
//!
//! ## Example Usage
//!
//! ```rust
//! use workout_tracker::input::WorkoutForm;
//! use workout_tracker::kv::MemoryKvStore;
//! use workout_tracker::store::WorkoutStore;
//!
//! let slot = MemoryKvStore::new();
//! let mut store = WorkoutStore::open(slot.clone());
//!
//! let form = WorkoutForm {
//!     kind: "running".into(),
//!     distance: "5".into(),
//!     duration: "30".into(),
//!     cadence: "150".into(),
//!     elevation: String::new(),
//! };
//! let pace = store
//!     .submit(form.parse([48.85, 2.35])?)?
//!     .as_running()
//!     .map(|r| r.pace());
//! assert_eq!(pace, Some(6.0));
//!
//! // Next session
//! let reopened = WorkoutStore::open(slot);
//! assert_eq!(reopened.len(), 1);
//! # Ok::<(), workout_tracker::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod input;
pub mod kv;
pub mod store;
pub mod view;
pub mod workout;

pub use error::{Error, Result};
pub use store::{WorkoutListener, WorkoutStore};
pub use workout::{Coords, Cycling, Running, Workout, WorkoutKind};
