//! Workout domain model
//!
//! ## Variants
//!
//! ```text
//! Workout ──┬── Running  (cadence, pace  = duration / distance)
//!           └── Cycling  (elevation gain, speed = distance / duration)
//! ```
//!
//! Derived values (pace, speed, description) are computed once when the
//! workout is created and cached. Branching on the variant goes through
//! [`Workout::kind`], which is also what gets persisted, so reloaded data
//! dispatches exactly like freshly created data.
//!
//! ## Usage
//!
//! ```rust
//! use workout_tracker::workout::{Workout, WorkoutKind};
//!
//! let run = Workout::running(150.0, 5.0, 30.0, [10.0, 10.0]);
//! assert_eq!(run.kind(), WorkoutKind::Running);
//! assert_eq!(run.as_running().map(|r| r.pace()), Some(6.0));
//! ```

mod common;
mod cycling;
mod record;
mod running;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub(crate) use common::{describe, new_id};
pub use common::{Coords, WorkoutCore};
pub use cycling::Cycling;
pub use record::WorkoutRecord;
pub use running::Running;

use crate::Error;

/// Workout type discriminant, persisted as `"running"` / `"cycling"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// Running workout
    Running,
    /// Cycling workout
    Cycling,
}

impl WorkoutKind {
    /// Tag as stored, e.g. `"running"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// Tag with the first letter capitalized, e.g. `"Running"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(Error::ContractViolation(format!(
                "unknown workout type {other:?}"
            ))),
        }
    }
}

/// A recorded workout of either variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Workout {
    /// Running workout
    Running(Running),
    /// Cycling workout
    Cycling(Cycling),
}

impl Workout {
    /// Create a running workout (see [`Running::new`]).
    #[must_use]
    pub fn running(cadence: f64, distance: f64, duration: f64, coords: impl Into<Coords>) -> Self {
        Self::Running(Running::new(cadence, distance, duration, coords))
    }

    /// Create a cycling workout (see [`Cycling::new`]).
    #[must_use]
    pub fn cycling(
        elevation_gain: f64,
        distance: f64,
        duration: f64,
        coords: impl Into<Coords>,
    ) -> Self {
        Self::Cycling(Cycling::new(elevation_gain, distance, duration, coords))
    }

    /// The type discriminant.
    #[must_use]
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running(_) => WorkoutKind::Running,
            Self::Cycling(_) => WorkoutKind::Cycling,
        }
    }

    /// Shared workout fields.
    #[must_use]
    pub const fn core(&self) -> &WorkoutCore {
        match self {
            Self::Running(r) => &r.core,
            Self::Cycling(c) => &c.core,
        }
    }

    /// Unique workout id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.core().id()
    }

    /// Distance in kilometers.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.core().distance()
    }

    /// Duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.core().duration()
    }

    /// Map position.
    #[must_use]
    pub const fn coords(&self) -> Coords {
        self.core().coords()
    }

    /// Selection counter.
    #[must_use]
    pub const fn clicks(&self) -> u32 {
        self.core().clicks()
    }

    /// Cached description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.core().description()
    }

    /// The running variant, if this is one.
    #[must_use]
    pub const fn as_running(&self) -> Option<&Running> {
        match self {
            Self::Running(r) => Some(r),
            Self::Cycling(_) => None,
        }
    }

    /// The cycling variant, if this is one.
    #[must_use]
    pub const fn as_cycling(&self) -> Option<&Cycling> {
        match self {
            Self::Cycling(c) => Some(c),
            Self::Running(_) => None,
        }
    }

    /// Count a selection of this workout.
    pub fn click(&mut self) {
        match self {
            Self::Running(r) => r.core.click(),
            Self::Cycling(c) => c.core.click(),
        }
    }

    /// Recompute the variant's derived metric and return it.
    ///
    /// Never called implicitly; editing support would call it after changing
    /// distance or duration.
    pub fn recompute(&mut self) -> f64 {
        match self {
            Self::Running(r) => r.calc_pace(),
            Self::Cycling(c) => c.calc_speed(),
        }
    }
}

impl From<Running> for Workout {
    fn from(r: Running) -> Self {
        Self::Running(r)
    }
}

impl From<Cycling> for Workout {
    fn from(c: Cycling) -> Self {
        Self::Cycling(c)
    }
}
