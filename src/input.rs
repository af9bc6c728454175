//! Validation of raw workout form input.
//!
//! The store trusts its inputs, so everything coming from the form is
//! checked here first. A rejected form never reaches the store.

use crate::workout::{Coords, WorkoutKind};
use crate::{Error, Result};

/// Message shown to the user when a form is rejected.
pub const INVALID_INPUT_MESSAGE: &str = "Inputs have to be positive numbers!";

/// The variant-specific number submitted with a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extra {
    /// Steps per minute (running)
    Cadence(f64),
    /// Meters climbed (cycling)
    ElevationGain(f64),
}

impl Extra {
    /// The workout type this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Cadence(_) => WorkoutKind::Running,
            Self::ElevationGain(_) => WorkoutKind::Cycling,
        }
    }

    /// The raw number.
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Cadence(v) | Self::ElevationGain(v) => *v,
        }
    }
}

/// A validated workout ready to hand to the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Submission {
    /// Declared workout type
    pub kind: WorkoutKind,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    /// Cadence or elevation gain
    pub extra: Extra,
    /// Clicked map position
    pub coords: Coords,
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    /// `"running"` or `"cycling"`
    pub kind: String,
    /// Distance field
    pub distance: String,
    /// Duration field
    pub duration: String,
    /// Cadence field (running)
    pub cadence: String,
    /// Elevation field (cycling)
    pub elevation: String,
}

impl WorkoutForm {
    /// Convert and validate the form for a workout at `coords`.
    ///
    /// Only the field matching the selected type is read. Distance,
    /// duration and cadence must be finite and positive; elevation gain
    /// only has to be finite.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` for an unknown type and `InvalidInput`
    /// when a number is rejected.
    pub fn parse(&self, coords: impl Into<Coords>) -> Result<Submission> {
        let kind: WorkoutKind = self.kind.trim().parse()?;
        let distance = coerce_number(&self.distance);
        let duration = coerce_number(&self.duration);

        let extra = match kind {
            WorkoutKind::Running => {
                let cadence = coerce_number(&self.cadence);
                if !valid_inputs(&[cadence, distance, duration]) {
                    return Err(Error::InvalidInput(INVALID_INPUT_MESSAGE.to_string()));
                }
                Extra::Cadence(cadence)
            }
            WorkoutKind::Cycling => {
                let elevation = coerce_number(&self.elevation);
                if !valid_inputs(&[distance, duration]) || !elevation.is_finite() {
                    return Err(Error::InvalidInput(INVALID_INPUT_MESSAGE.to_string()));
                }
                Extra::ElevationGain(elevation)
            }
        };

        Ok(Submission {
            kind,
            distance,
            duration,
            extra,
            coords: coords.into(),
        })
    }
}

/// True when every value is finite and strictly positive.
#[must_use]
pub fn valid_inputs(inputs: &[f64]) -> bool {
    inputs.iter().all(|v| v.is_finite() && *v > 0.0)
}

/// Numeric coercion of a text field: blank is zero, anything unparsable is NaN.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
