//! Running-workout page commands.

use serde::Serialize;
use tracing::info;

use crate::api::{AddWorkoutRequest, ApiClient, ApiError};
use crate::device;
use crate::models::{RunningWorkoutForm, UserSession};
use crate::validation::validate_running_form;

use super::{SubmitError, WorkoutSubmission};

/// One choice in the form's assignment picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTarget {
  pub name: String,
  pub is_flock: bool,
}

/// Validate the form, encode the device document, and schedule the workout.
pub async fn submit_running_workout(
  client: &ApiClient,
  session: &UserSession,
  form: &RunningWorkoutForm,
) -> Result<WorkoutSubmission, SubmitError> {
  let draft = validate_running_form(form).map_err(SubmitError::Validation)?;

  let document = device::encode_running_workout(&draft);
  let request = AddWorkoutRequest {
    target_name: form.target_name.trim().to_string(),
    is_flock: form.target_is_flock,
    json_body: serde_json::to_string(&document).unwrap_or_default(),
    date: draft.date.format("%Y-%m-%d").to_string(),
  };

  client.add_workout(&session.api_key, &request).await?;

  info!(
    workout = %draft.name,
    target = %request.target_name,
    blocks = draft.blocks.len(),
    "running workout scheduled"
  );

  Ok(WorkoutSubmission {
    workout_name: draft.name,
    target_name: request.target_name,
    date: request.date,
  })
}

/// Athletes and flocks this coach can assign to, athletes first.
pub async fn load_workout_targets(
  client: &ApiClient,
  session: &UserSession,
) -> Result<Vec<WorkoutTarget>, ApiError> {
  let athletes = client.get_athletes(&session.api_key).await?;
  let flocks = client.get_flocks(&session.api_key).await?;

  let mut targets: Vec<WorkoutTarget> = athletes
    .into_iter()
    .map(|entry| WorkoutTarget {
      name: entry.name,
      is_flock: false,
    })
    .collect();
  targets.extend(flocks.into_iter().map(|entry| WorkoutTarget {
    name: entry.name,
    is_flock: true,
  }));

  Ok(targets)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
