//! Unit conversions shared by the workout forms and review pages.
//!
//! Paces are decimal minutes per kilometre, speeds are metres per second,
//! normalized durations are seconds (time) or metres (distance).

use crate::models::{DurationKind, DurationUnit};

/// ---------------------------------------------------------------------------
/// Pace Text Parsing and Formatting
/// ---------------------------------------------------------------------------

/// Parse an "mm:ss" pace string into decimal minutes per kilometre.
///
/// Returns `None` for anything that is not a well-formed pace (missing or
/// extra colon, non-numeric parts, seconds >= 60). `None` means "not a
/// usable value yet"; the form keeps accepting keystrokes.
pub fn pace_string_to_minutes(text: &str) -> Option<f64> {
  let mut parts = text.split(':');
  let minutes = parts.next()?.trim().parse::<u32>().ok()?;
  let seconds = parts.next()?.trim().parse::<u32>().ok()?;

  if parts.next().is_some() || seconds >= 60 {
    return None;
  }

  Some(f64::from(minutes) + f64::from(seconds) / 60.0)
}

/// Format decimal minutes per kilometre as "mm:ss", rounding to the nearest
/// second. Negative or non-finite input formats as an empty string.
pub fn minutes_to_pace_string(minutes: f64) -> String {
  if !minutes.is_finite() || minutes < 0.0 {
    return String::new();
  }

  let total_seconds = (minutes * 60.0).round() as u64;
  format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// ---------------------------------------------------------------------------
/// Duration Normalization
/// ---------------------------------------------------------------------------

/// Normalize a duration value to the device units: seconds for time spans,
/// metres for distances. A unit that does not belong to the kind passes
/// through unchanged; validation rejects that pairing before submission.
pub fn duration_to_normalized(value: f64, kind: DurationKind, unit: DurationUnit) -> f64 {
  match (kind, unit) {
    (DurationKind::Time, DurationUnit::Minutes) => value * 60.0,
    (DurationKind::Time, DurationUnit::Seconds) => value,
    (DurationKind::Distance, DurationUnit::Kilometers) => value * 1000.0,
    (DurationKind::Distance, DurationUnit::Meters) => value,
    _ => value,
  }
}

/// ---------------------------------------------------------------------------
/// Pace <-> Speed
/// ---------------------------------------------------------------------------

/// Convert a pace in min/km to a speed in m/s: 1000 / (pace * 60).
///
/// Callers must reject pace <= 0 first; the division is unguarded.
pub fn min_per_km_to_mps(min_per_km: f64) -> f64 {
  1000.0 / (min_per_km * 60.0)
}

/// Inverse of [`min_per_km_to_mps`], for displaying stored speeds.
pub fn mps_to_min_per_km(mps: f64) -> f64 {
  (1000.0 / mps) / 60.0
}

/// Format a speed as a pace string, e.g. 3.333 m/s as "5:00". Non-positive
/// or non-finite speeds format as an empty string.
pub fn mps_to_pace_string(mps: f64) -> String {
  if !mps.is_finite() || mps <= 0.0 {
    return String::new();
  }
  minutes_to_pace_string(mps_to_min_per_km(mps))
}

/// ---------------------------------------------------------------------------
/// Display Formatting
/// ---------------------------------------------------------------------------

/// Format a normalized distance for display: "400 m" below one kilometre,
/// "1.4 km" at or above it.
pub fn meters_to_display(meters: f64) -> String {
  if meters >= 1000.0 {
    let km = meters / 1000.0;
    if (km - km.round()).abs() < 1e-9 {
      format!("{} km", km.round() as i64)
    } else {
      format!("{:.1} km", km)
    }
  } else {
    format!("{} m", meters.round() as i64)
  }
}

/// Format a second count as a clock string: "5:00", or "1:02:30" once the
/// span reaches an hour. Negative or non-finite input formats as empty.
pub fn seconds_to_clock(seconds: f64) -> String {
  if !seconds.is_finite() || seconds < 0.0 {
    return String::new();
  }

  let total = seconds.round() as u64;
  let hours = total / 3600;
  let minutes = (total % 3600) / 60;
  let secs = total % 60;

  if hours > 0 {
    format!("{}:{:02}:{:02}", hours, minutes, secs)
  } else {
    format!("{}:{:02}", minutes, secs)
  }
}

/// Format a second count as whole hours and minutes, e.g. "7h 32m".
pub fn seconds_to_hours_minutes(seconds: i64) -> String {
  let clamped = seconds.max(0);
  format!("{}h {}m", clamped / 3600, (clamped % 3600) / 60)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
