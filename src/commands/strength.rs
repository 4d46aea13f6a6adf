//! Strength-workout page command.
//!
//! Strength workouts always belong to the signed-in athlete; there is no
//! assignment picker on that page.

use tracing::info;

use crate::api::ApiClient;
use crate::device;
use crate::models::{StrengthWorkoutForm, UserSession};
use crate::validation::validate_strength_form;

use super::{SubmitError, WorkoutSubmission};

/// Validate the form and log the drill session.
pub async fn submit_strength_workout(
  client: &ApiClient,
  session: &UserSession,
  form: &StrengthWorkoutForm,
) -> Result<WorkoutSubmission, SubmitError> {
  let draft = validate_strength_form(form).map_err(SubmitError::Validation)?;

  let payload = device::encode_strength_workout(&draft);
  client
    .add_strength_workout(&session.api_key, &payload)
    .await?;

  info!(
    workout = %draft.name,
    drills = draft.drills.len(),
    "strength workout logged"
  );

  Ok(WorkoutSubmission {
    workout_name: draft.name,
    target_name: session.display_name.clone(),
    date: payload.workout_date,
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::ApiConfig;
  use crate::test_utils::{session, strength_form};
  use mockito::Matcher;
  use serde_json::json;

  fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url: server.url(),
    })
  }

  #[tokio::test]
  async fn test_submit_posts_drill_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/api/addStrengthWorkout")
      .match_query(Matcher::UrlEncoded("apiKey".into(), "test-key-123".into()))
      .match_body(Matcher::Json(json!({
        "WorkoutName": "Hill strength",
        "WorkoutDescription": "After the easy run",
        "WorkoutDate": "01/14/2024",
        "WorkoutDrills": [
          { "DrillName": "Goblet squat", "DrillSets": 3, "DrillReps": 10 },
          { "DrillName": "Calf raise", "DrillSets": 4, "DrillReps": 12 }
        ]
      })))
      .with_status(200)
      .with_body("{}")
      .create_async()
      .await;

    let client = client_for(&server);
    let submission = submit_strength_workout(&client, &session(), &strength_form())
      .await
      .unwrap();

    assert_eq!(submission.workout_name, "Hill strength");
    assert_eq!(submission.target_name, "Anna");
    assert_eq!(submission.date, "01/14/2024");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_submit_collects_drill_issues_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/api/addStrengthWorkout")
      .expect(0)
      .create_async()
      .await;

    let client = client_for(&server);
    let mut form = strength_form();
    form.drills[0].sets = Some(0);
    form.drills[1].name = String::new();

    let error = submit_strength_workout(&client, &session(), &form)
      .await
      .unwrap_err();

    match error {
      SubmitError::Validation(issues) => assert_eq!(issues.len(), 2),
      other => panic!("expected validation error, got {:?}", other),
    }
    mock.assert_async().await;
  }
}
