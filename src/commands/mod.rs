//! Page-facing commands.
//!
//! One async function per user action. Dependencies come in as arguments:
//! the embedding page owns the `ApiClient` and the `UserSession` and passes
//! them into every call.

pub mod auth;
pub mod running;
pub mod sleep;
pub mod strength;
pub mod workouts;

use serde::Serialize;

use crate::api::ApiError;
use crate::validation::ValidationIssue;

/// Why a form submission did not go through. Field issues render inline
/// next to their inputs; API failures become the page banner.
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(tag = "type", content = "detail")]
pub enum SubmitError {
  #[error("The form has {} unresolved field(s)", .0.len())]
  Validation(Vec<ValidationIssue>),

  #[error(transparent)]
  Api(#[from] ApiError),
}

/// What a successful submission was, for the confirmation toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSubmission {
  pub workout_name: String,
  /// Athlete or flock the workout went to.
  pub target_name: String,
  /// Date as sent to the API.
  pub date: String,
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
