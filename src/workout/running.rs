//! Running workout

use super::{Coords, WorkoutCore, WorkoutKind};

/// A running workout with cadence and cached pace.
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    pub(crate) core: WorkoutCore,
    pub(crate) cadence: f64,
    pub(crate) pace: f64,
}

impl Running {
    /// Record a run.
    ///
    /// Inputs are trusted: a zero distance gives an infinite pace rather
    /// than an error. Validate with [`crate::input`] first.
    ///
    /// # Arguments
    ///
    /// * `cadence` - Steps per minute
    /// * `distance` - Kilometers
    /// * `duration` - Minutes
    /// * `coords` - Map position
    #[must_use]
    pub fn new(cadence: f64, distance: f64, duration: f64, coords: impl Into<Coords>) -> Self {
        let core = WorkoutCore::new(WorkoutKind::Running, distance, duration, coords.into());
        let mut running = Self {
            core,
            cadence,
            pace: 0.0,
        };
        running.calc_pace();
        running
    }

    /// Shared workout fields.
    #[must_use]
    pub const fn core(&self) -> &WorkoutCore {
        &self.core
    }

    /// Steps per minute.
    #[must_use]
    pub const fn cadence(&self) -> f64 {
        self.cadence
    }

    /// Minutes per kilometer, computed at construction.
    #[must_use]
    pub const fn pace(&self) -> f64 {
        self.pace
    }

    /// Recompute pace from duration and distance.
    pub fn calc_pace(&mut self) -> f64 {
        self.pace = self.core.duration / self.core.distance;
        self.pace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_pace() {
        let run = Running::new(150.0, 5.0, 30.0, [10.0, 10.0]);

        assert_eq!(run.pace(), 6.0);
        assert_eq!(run.cadence(), 150.0);
        assert_eq!(run.core().clicks(), 0);
        assert!(run.core().description().starts_with("Running on "));
    }

    #[test]
    fn test_zero_distance_is_not_rejected() {
        let run = Running::new(150.0, 0.0, 30.0, [0.0, 0.0]);
        assert!(run.pace().is_infinite());
    }
}
