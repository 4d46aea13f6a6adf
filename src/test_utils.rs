//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - Test fixtures
//! - Helper assertions

use chrono::NaiveDate;

use crate::models::{
  BlockForm, DrillForm, DurationKind, DurationUnit, PaceMode, RunningWorkoutForm, SleepNight,
  StepForm, StepKind, StrengthWorkoutForm, UserSession,
};
use uuid::Uuid;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a filled-in run step: 400 m at a specific 4:30 pace
pub fn run_step_form() -> StepForm {
  StepForm {
    id: Uuid::new_v4(),
    kind: StepKind::Run,
    duration_kind: DurationKind::Distance,
    duration_unit: DurationUnit::Meters,
    duration_value: Some(400.0),
    pace_mode: PaceMode::Specific,
    pace: "4:30".to_string(),
    pace_low: String::new(),
    pace_high: String::new(),
  }
}

/// Create a filled-in rest step: 200 m recovery
pub fn rest_step_form() -> StepForm {
  StepForm {
    id: Uuid::new_v4(),
    kind: StepKind::Rest,
    duration_kind: DurationKind::Distance,
    duration_unit: DurationUnit::Meters,
    duration_value: Some(200.0),
    pace_mode: PaceMode::Specific,
    pace: String::new(),
    pace_low: String::new(),
    pace_high: String::new(),
  }
}

/// Create a complete running form: one block of 3 x (400 m run, 200 m rest)
/// assigned to the athlete "alice" on 2024-01-14
pub fn running_form() -> RunningWorkoutForm {
  RunningWorkoutForm {
    name: "Tempo Tuesday".to_string(),
    date: Some(date(2024, 1, 14)),
    description: "Relaxed shoulders on the repeats".to_string(),
    target_name: "alice".to_string(),
    target_is_flock: false,
    blocks: vec![BlockForm {
      id: Uuid::new_v4(),
      repeat_count: 3,
      steps: vec![run_step_form(), rest_step_form()],
    }],
  }
}

/// Create a complete strength form with two drills on 2024-01-14
pub fn strength_form() -> StrengthWorkoutForm {
  StrengthWorkoutForm {
    name: "Hill strength".to_string(),
    date: Some(date(2024, 1, 14)),
    description: "After the easy run".to_string(),
    drills: vec![
      DrillForm {
        id: Uuid::new_v4(),
        name: "Goblet squat".to_string(),
        sets: Some(3),
        reps: Some(10),
      },
      DrillForm {
        id: Uuid::new_v4(),
        name: "Calf raise".to_string(),
        sets: Some(4),
        reps: Some(12),
      },
    ],
  }
}

/// Create a signed-in session for the coach "Anna"
pub fn session() -> UserSession {
  UserSession {
    user_name: "coach_anna".to_string(),
    display_name: "Anna".to_string(),
    api_key: "test-key-123".to_string(),
  }
}

/// Create one night of sleep totalling the given hours, no stage breakdown
pub fn sleep_night(date: NaiveDate, hours: f64) -> SleepNight {
  SleepNight {
    date,
    total_sleep_seconds: (hours * 3600.0).round() as i64,
    deep_sleep_seconds: None,
    rem_sleep_seconds: None,
    light_sleep_seconds: None,
    sleep_score: None,
  }
}

/// ---------------------------------------------------------------------------
/// Time Utilities
/// ---------------------------------------------------------------------------

/// Create a NaiveDate from components known to be valid
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {{
    let diff = f64::abs($left - $right);
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  }};
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_running_form_factory_is_complete() {
    let form = running_form();
    assert!(!form.name.is_empty());
    assert!(form.date.is_some());
    assert!(!form.target_name.is_empty());
    assert_eq!(form.blocks.len(), 1);
    assert_eq!(form.blocks[0].steps.len(), 2);
  }

  #[test]
  fn test_strength_form_factory_is_complete() {
    let form = strength_form();
    assert_eq!(form.drills.len(), 2);
    assert!(form.drills.iter().all(|drill| drill.sets.is_some() && drill.reps.is_some()));
  }

  #[test]
  fn test_sleep_night_converts_hours_to_seconds() {
    let night = sleep_night(date(2024, 1, 14), 7.5);
    assert_eq!(night.total_sleep_seconds, 27_000);
  }

  #[test]
  fn test_assert_approx_eq_accepts_close_values() {
    assert_approx_eq!(1.0, 1.0 + 1e-10, 1e-9);
  }
}
