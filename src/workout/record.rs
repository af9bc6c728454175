//! Persisted workout layout and reconstruction into variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{describe, Coords, Cycling, Running, Workout, WorkoutCore, WorkoutKind};
use crate::Error;

/// One workout as stored in the key-value slot.
///
/// Flat layout: the shared fields, the `type` tag and whichever of
/// `cadence`/`pace` or `elevationGain`/`speed` the variant carries.
/// Turning a record back into a [`Workout`] dispatches on `type`.
///
/// JSON has no NaN or infinity, so non-finite numbers are written as `null`
/// and read back as NaN. Trusted-but-invalid workouts reload instead of
/// poisoning the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Workout id
    pub id: String,
    /// Creation timestamp
    pub date: DateTime<Utc>,
    /// Kilometers
    #[serde(deserialize_with = "nan_if_null")]
    pub distance: f64,
    /// Minutes
    #[serde(deserialize_with = "nan_if_null")]
    pub duration: f64,
    /// `[lat, lng]`
    pub coords: Coords,
    /// Selection counter
    #[serde(default)]
    pub clicks: u32,
    /// Cached description; rebuilt from `type` and `date` when absent
    #[serde(default)]
    pub description: Option<String>,
    /// Variant tag
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    /// Running only; `null` reads as NaN, absent as `None`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_nan_if_null"
    )]
    pub cadence: Option<f64>,
    /// Running only; non-finite values are stored as `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    /// Cycling only; `null` reads as NaN, absent as `None`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_nan_if_null"
    )]
    pub elevation_gain: Option<f64>,
    /// Cycling only; non-finite values are stored as `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

fn nan_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// Only called when the key is present; `default` covers the absent case.
fn present_nan_if_null<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    nan_if_null(deserializer).map(Some)
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let core = workout.core();
        let mut record = Self {
            id: core.id.clone(),
            date: core.date,
            distance: core.distance,
            duration: core.duration,
            coords: core.coords,
            clicks: core.clicks,
            description: Some(core.description.clone()),
            kind: workout.kind(),
            cadence: None,
            pace: None,
            elevation_gain: None,
            speed: None,
        };
        match workout {
            Workout::Running(r) => {
                record.cadence = Some(r.cadence);
                record.pace = Some(r.pace);
            }
            Workout::Cycling(c) => {
                record.elevation_gain = Some(c.elevation_gain);
                record.speed = Some(c.speed);
            }
        }
        record
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = Error;

    /// Rebuild the variant named by the record's `type` tag.
    ///
    /// Cached metrics are taken as stored; a missing one is recomputed.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` when the variant's own field
    /// (`cadence` or `elevationGain`) is missing.
    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let description = match record.description {
            Some(d) if !d.is_empty() => d,
            _ => describe(record.kind, record.date),
        };
        let core = WorkoutCore {
            id: record.id,
            date: record.date,
            distance: record.distance,
            duration: record.duration,
            coords: record.coords,
            clicks: record.clicks,
            description,
        };

        match record.kind {
            WorkoutKind::Running => {
                let cadence = record.cadence.ok_or_else(|| {
                    Error::ContractViolation(format!("running workout {} has no cadence", core.id))
                })?;
                let mut running = Running {
                    core,
                    cadence,
                    pace: 0.0,
                };
                match record.pace {
                    Some(pace) => running.pace = pace,
                    None => {
                        running.calc_pace();
                    }
                }
                Ok(Self::Running(running))
            }
            WorkoutKind::Cycling => {
                let elevation_gain = record.elevation_gain.ok_or_else(|| {
                    Error::ContractViolation(format!(
                        "cycling workout {} has no elevationGain",
                        core.id
                    ))
                })?;
                let mut cycling = Cycling {
                    core,
                    elevation_gain,
                    speed: 0.0,
                };
                match record.speed {
                    Some(speed) => cycling.speed = speed,
                    None => {
                        cycling.calc_speed();
                    }
                }
                Ok(Self::Cycling(cycling))
            }
        }
    }
}
