//! Fields shared by every workout variant.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkoutKind;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A map position as (latitude, longitude).
///
/// Persisted as a two-element array `[lat, lng]`; a `null` entry reads as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Option<f64>; 2]", into = "[f64; 2]")]
pub struct Coords {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coords {
    /// Create coordinates from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<[Option<f64>; 2]> for Coords {
    fn from([lat, lng]: [Option<f64>; 2]) -> Self {
        Self {
            lat: lat.unwrap_or(f64::NAN),
            lng: lng.unwrap_or(f64::NAN),
        }
    }
}

impl From<(f64, f64)> for Coords {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

/// State common to running and cycling workouts.
///
/// Everything except `clicks` is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCore {
    pub(crate) id: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) distance: f64,
    pub(crate) duration: f64,
    pub(crate) coords: Coords,
    pub(crate) clicks: u32,
    pub(crate) description: String,
}

impl WorkoutCore {
    /// Stamp a fresh id and the current time, and derive the description.
    pub(crate) fn new(kind: WorkoutKind, distance: f64, duration: f64, coords: Coords) -> Self {
        let date = Utc::now();
        Self {
            id: new_id(),
            date,
            distance,
            duration,
            coords,
            clicks: 0,
            description: describe(kind, date),
        }
    }

    /// Unique workout id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Distance in kilometers.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Where the workout was marked on the map.
    #[must_use]
    pub const fn coords(&self) -> Coords {
        self.coords
    }

    /// How many times the workout was selected.
    #[must_use]
    pub const fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Human readable title, e.g. "Running on April 14".
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// Generate a workout id.
///
/// UUID v4 in simple form: 122 random bits, so ids do not collide across
/// sessions or devices in practice.
#[must_use]
pub(crate) fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Format `"{Type} on {Month} {Day}"` using the local calendar date of `date`.
#[must_use]
pub(crate) fn describe(kind: WorkoutKind, date: DateTime<Utc>) -> String {
    let local = date.with_timezone(&Local);
    format!(
        "{} on {} {}",
        kind.label(),
        MONTHS[local.month0() as usize],
        local.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_day(date: DateTime<Utc>) -> u32 {
        date.with_timezone(&Local).day()
    }

    #[test]
    fn test_describe_uses_month_table_without_padding() {
        // Mid-month noon UTC: the local month is April in every timezone.
        let date = Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap();
        let day = local_day(date);

        assert_eq!(describe(WorkoutKind::Running, date), format!("Running on April {day}"));
        assert_eq!(describe(WorkoutKind::Cycling, date), format!("Cycling on April {day}"));
    }

    #[test]
    fn test_describe_single_digit_day() {
        let date = Utc.with_ymd_and_hms(2024, 12, 5, 12, 0, 0).unwrap();
        let description = describe(WorkoutKind::Running, date);

        assert_eq!(description, format!("Running on December {}", local_day(date)));
        assert!(!description.contains(" 0"));
    }

    #[test]
    fn test_new_id_is_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.len() == 32));
    }

    #[test]
    fn test_coords_serialize_as_array() {
        let json = serde_json::to_string(&Coords::new(10.5, -3.25)).unwrap();
        assert_eq!(json, "[10.5,-3.25]");

        let back: Coords = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Coords::new(10.5, -3.25));
    }
}
