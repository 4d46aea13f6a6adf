//! Workout review page command.
//!
//! Fetches scheduled workouts and renders each device document back into
//! the human-readable interval lines the form originally described.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::api::{ApiClient, ApiError, ScheduledWorkout};
use crate::device::{DeviceDurationType, DeviceStep, DeviceWorkoutDocument, Intensity};
use crate::models::UserSession;
use crate::units;

/// One row of the review page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutReview {
  pub workout_name: String,
  pub description: String,
  pub date: NaiveDate,
  pub sport: String,
  /// One line per interval block, e.g. "3 x (400 m @ 4:00 /km, 200 m rest)".
  /// Empty for strength workouts and undecodable documents.
  pub intervals: Vec<String>,
}

/// Scheduled workouts for the review page, as the API orders them.
pub async fn list_workouts(
  client: &ApiClient,
  session: &UserSession,
) -> Result<Vec<WorkoutReview>, ApiError> {
  let scheduled = client.get_workouts(&session.api_key).await?;

  Ok(scheduled.into_iter().map(review_from).collect())
}

fn review_from(workout: ScheduledWorkout) -> WorkoutReview {
  let intervals = match workout.json_body.as_deref() {
    Some(body) => match serde_json::from_str::<DeviceWorkoutDocument>(body) {
      Ok(document) => document.steps.iter().map(describe_group).collect(),
      Err(e) => {
        // A row with an unreadable document still renders, just without
        // the interval breakdown.
        warn!(workout = %workout.workout_name, error = %e, "undecodable workout document");
        Vec::new()
      }
    },
    None => Vec::new(),
  };

  WorkoutReview {
    workout_name: workout.workout_name,
    description: workout.description,
    date: workout.date,
    sport: workout.sport,
    intervals,
  }
}

/// One line for a repeat group: "3 x (400 m @ 4:00 /km, 200 m rest)".
/// Single-pass groups drop the multiplier.
fn describe_group(group: &DeviceStep) -> String {
  let body = group
    .steps
    .as_deref()
    .unwrap_or(&[])
    .iter()
    .map(describe_step)
    .collect::<Vec<_>>()
    .join(", ");

  if group.repeat_value > 1 {
    format!("{} x ({})", group.repeat_value, body)
  } else {
    body
  }
}

fn describe_step(step: &DeviceStep) -> String {
  let duration = match step.duration_type {
    Some(DeviceDurationType::Distance) => units::meters_to_display(step.duration_value),
    _ => units::seconds_to_clock(step.duration_value),
  };

  match step.intensity {
    Intensity::Rest => format!("{} rest", duration),
    Intensity::Interval => {
      // The low field holds the faster speed; shown as faster-slower paces.
      let fast = units::mps_to_pace_string(step.target_value_low);
      let slow = units::mps_to_pace_string(step.target_value_high);

      if fast.is_empty() {
        format!("{} run", duration)
      } else if fast == slow {
        format!("{} @ {} /km", duration, fast)
      } else {
        format!("{} @ {}-{} /km", duration, fast, slow)
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
