//! Rendering data for the map and workout list.
//!
//! Icons and CSS classes are keyed by [`WorkoutKind`], the same tag that is
//! persisted, so reloaded workouts render exactly like fresh ones.

use crate::workout::{Coords, Workout, WorkoutKind};

/// Zoom level the map opens at.
pub const MAP_ZOOM_LEVEL: u8 = 13;

/// Extra zoom applied when jumping to a workout from the list.
pub const FOCUS_ZOOM_OFFSET: u8 = 3;

/// Where the map should move when a list entry is clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFocus {
    /// Target position
    pub coords: Coords,
    /// Target zoom level
    pub zoom: u8,
}

impl MapFocus {
    /// Focus on a workout's position at list-click zoom.
    #[must_use]
    pub const fn on(workout: &Workout) -> Self {
        Self {
            coords: workout.coords(),
            zoom: MAP_ZOOM_LEVEL + FOCUS_ZOOM_OFFSET,
        }
    }
}

/// Marker icon for a workout type.
#[must_use]
pub const fn icon(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    }
}

/// CSS class of the marker popup.
#[must_use]
pub const fn popup_class(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "running-popup",
        WorkoutKind::Cycling => "cycling-popup",
    }
}

/// Popup text, e.g. "🏃‍♂️ Running on April 14".
#[must_use]
pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", icon(workout.kind()), workout.description())
}

/// One icon/value/unit line of a list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    /// Leading icon
    pub icon: &'static str,
    /// Formatted value
    pub value: String,
    /// Unit label
    pub unit: &'static str,
}

impl DetailRow {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Display a number the way the list shows raw values: `Infinity`, `NaN`,
/// and no sign on zero.
#[must_use]
pub fn display_number(value: f64) -> String {
    match non_finite(value) {
        Some(text) => text.to_string(),
        None if value == 0.0 => "0".to_string(),
        None => value.to_string(),
    }
}

/// Format with one decimal, rounding exact halves away from zero
/// (`0.25` shows as `0.3`, `-0.25` as `-0.3`).
///
/// `{:.1}` alone rounds halves to even; every other value already gets the
/// nearest decimal.
#[must_use]
pub fn one_decimal(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }
    let quarters = value * 4.0;
    // A one-decimal tie is exactly representable only when 4x is odd.
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        None
    }
}

/// Everything needed to draw one entry of the workout list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Workout id, used to resolve clicks back to the workout
    pub id: String,
    /// CSS class, `workout workout--{type}`
    pub class: String,
    /// Entry title (the workout description)
    pub title: String,
    /// Detail lines in display order
    pub rows: Vec<DetailRow>,
}

impl ListEntry {
    /// Build the list entry for a workout.
    #[must_use]
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut rows = vec![
            DetailRow::new(icon(kind), display_number(workout.distance()), "km"),
            DetailRow::new("⏱", display_number(workout.duration()), "min"),
        ];

        match workout {
            Workout::Running(r) => {
                rows.push(DetailRow::new("⚡️", one_decimal(r.pace()), "min/km"));
                rows.push(DetailRow::new("🦶🏼", display_number(r.cadence()), "spm"));
            }
            Workout::Cycling(c) => {
                rows.push(DetailRow::new("⚡️", one_decimal(c.speed()), "km/h"));
                rows.push(DetailRow::new("⛰", display_number(c.elevation_gain()), "m"));
            }
        }

        Self {
            id: workout.id().to_string(),
            class: format!("workout workout--{kind}"),
            title: workout.description().to_string(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_entry() {
        let run = Workout::running(150.0, 5.0, 30.0, [10.0, 10.0]);
        let entry = ListEntry::for_workout(&run);

        assert_eq!(entry.id, run.id());
        assert_eq!(entry.class, "workout workout--running");
        assert_eq!(entry.title, run.description());
        let values: Vec<_> = entry.rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["5", "30", "6.0", "150"]);
        assert_eq!(entry.rows[2].unit, "min/km");
        assert_eq!(entry.rows[0].icon, "🏃‍♂️");
    }

    #[test]
    fn test_cycling_entry() {
        let ride = Workout::cycling(200.0, 30.0, 60.0, [5.0, 5.0]);
        let entry = ListEntry::for_workout(&ride);

        assert_eq!(entry.class, "workout workout--cycling");
        let values: Vec<_> = entry.rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["30", "60", "0.5", "200"]);
        assert_eq!(entry.rows[3].unit, "m");
    }

    #[test]
    fn test_one_decimal_rounds_halves_up() {
        assert_eq!(one_decimal(0.25), "0.3");
        assert_eq!(one_decimal(0.75), "0.8");
        assert_eq!(one_decimal(1.25), "1.3");
        assert_eq!(one_decimal(-0.25), "-0.3");
        assert_eq!(one_decimal(6.0), "6.0");
        assert_eq!(one_decimal(1.0 / 3.0), "0.3");
        // 0.35 is stored slightly below the half
        assert_eq!(one_decimal(0.35), "0.3");
        assert_eq!(one_decimal(-0.0), "0.0");
    }

    #[test]
    fn test_non_finite_values_display() {
        assert_eq!(one_decimal(f64::INFINITY), "Infinity");
        assert_eq!(one_decimal(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(one_decimal(f64::NAN), "NaN");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(2.5), "2.5");
    }

    #[test]
    fn test_entry_rounds_half_pace_up() {
        // 1 minute over 4 km
        let run = Workout::running(f64::NAN, 4.0, 1.0, [0.0, 0.0]);
        let entry = ListEntry::for_workout(&run);
        let values: Vec<_> = entry.rows.iter().map(|r| r.value.as_str()).collect();

        assert_eq!(values, vec!["4", "1", "0.3", "NaN"]);
    }

    #[test]
    fn test_entry_with_zero_duration() {
        let ride = Workout::cycling(10.0, 12.0, 0.0, [0.0, 0.0]);
        let entry = ListEntry::for_workout(&ride);

        assert_eq!(entry.rows[2].value, "Infinity");
    }

    #[test]
    fn test_popup() {
        let ride = Workout::cycling(0.0, 10.0, 30.0, [5.0, 5.0]);

        assert_eq!(popup_class(ride.kind()), "cycling-popup");
        assert_eq!(
            popup_content(&ride),
            format!("🚴‍♀️ {}", ride.description())
        );
    }

    #[test]
    fn test_map_focus_zoom() {
        let run = Workout::running(150.0, 5.0, 30.0, [12.5, -7.0]);
        let focus = MapFocus::on(&run);

        assert_eq!(focus.zoom, 16);
        assert_eq!(focus.coords, Coords::new(12.5, -7.0));
    }
}
