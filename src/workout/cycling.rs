//! Cycling workout

use super::{Coords, WorkoutCore, WorkoutKind};

/// A cycling workout with elevation gain and cached speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycling {
    pub(crate) core: WorkoutCore,
    pub(crate) elevation_gain: f64,
    pub(crate) speed: f64,
}

impl Cycling {
    /// Record a ride.
    ///
    /// `elevation_gain` may be zero or negative. A zero duration gives an
    /// infinite speed.
    #[must_use]
    pub fn new(
        elevation_gain: f64,
        distance: f64,
        duration: f64,
        coords: impl Into<Coords>,
    ) -> Self {
        let core = WorkoutCore::new(WorkoutKind::Cycling, distance, duration, coords.into());
        let mut cycling = Self {
            core,
            elevation_gain,
            speed: 0.0,
        };
        cycling.calc_speed();
        cycling
    }

    /// Shared workout fields.
    #[must_use]
    pub const fn core(&self) -> &WorkoutCore {
        &self.core
    }

    /// Meters climbed.
    #[must_use]
    pub const fn elevation_gain(&self) -> f64 {
        self.elevation_gain
    }

    /// `distance / duration`, computed at construction.
    ///
    /// Duration is in minutes, so this is km per minute even though the
    /// list view labels it km/h.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Recompute speed from distance and duration.
    pub fn calc_speed(&mut self) -> f64 {
        self.speed = self.core.distance / self.core.duration;
        self.speed
    }
}
