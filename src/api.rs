//! FlockFit remote API client.
//!
//! Thin typed wrapper over the product's HTTP API. Every method performs one
//! request against one endpoint; retries, caching, and credential storage
//! are the embedding page's concern.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

use crate::device::StrengthWorkoutPayload;
use crate::models::SleepNight;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

/// Production origin. FLOCKFIT_API_URL overrides it for staging and tests.
const DEFAULT_API_URL: &str = "https://api.flockfit.app";
const API_URL_VAR: &str = "FLOCKFIT_API_URL";

#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

impl ApiConfig {
  /// Resolve the API origin from the environment, loading `.env` first.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();

    Self {
      base_url: env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("An account with that name already exists")]
  AccountExists,

  #[error("Invalid username or password")]
  InvalidUser,

  #[error("The server rejected the request ({status}): {message}")]
  Rejected { status: u16, message: String },

  #[error("Could not read the server response: {0}")]
  Parse(String),

  #[error("Invalid API URL: {0}")]
  BadUrl(String),
}

// The pages render this as a banner string.
impl Serialize for ApiError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Error body the current API returns. Older deployments send only prose in
/// `message`, hence the text sniffing fallback below.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
  #[serde(default)]
  error_code: Option<String>,
  #[serde(default)]
  message: Option<String>,
}

fn error_from_code(code: &str) -> Option<ApiError> {
  match code {
    "NO_USER" | "INVALID_USER" => Some(ApiError::InvalidUser),
    "USER_EXISTS" => Some(ApiError::AccountExists),
    _ => None,
  }
}

// Stopgap for deployments without errorCode; drop once they are gone.
fn is_invalid_user_message(message: &str) -> bool {
  let lowered = message.to_lowercase();
  lowered.contains("no user") || lowered.contains("invalid user")
}

/// Classify a non-success payload into a typed error.
fn rejection(status: u16, body: &str) -> ApiError {
  let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

  if let Some(known) = parsed.error_code.as_deref().and_then(error_from_code) {
    return known;
  }

  let message = parsed.message.unwrap_or_else(|| body.trim().to_string());
  if is_invalid_user_message(&message) {
    return ApiError::InvalidUser;
  }

  ApiError::Rejected { status, message }
}

/// ---------------------------------------------------------------------------
/// Wire Types
/// ---------------------------------------------------------------------------

/// Body for addUser and verifyUser. The password never travels raw; the
/// command layer hashes it before building this.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
  pub user_name: String,
  pub password_hash: String,
}

/// Success body from addUser and verifyUser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccess {
  pub api_key: String,
  pub user_name: String,
  #[serde(default)]
  pub display_name: Option<String>,
}

/// Envelope for POST addWorkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWorkoutRequest {
  /// Athlete or flock name the workout is assigned to.
  pub target_name: String,
  pub is_flock: bool,
  /// The device document, JSON-encoded again: the API wants a string here,
  /// not a nested object.
  pub json_body: String,
  /// yyyy-MM-dd.
  pub date: String,
}

/// Scheduled workout row from getWorkouts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledWorkout {
  pub workout_name: String,
  #[serde(default)]
  pub description: String,
  pub date: NaiveDate,
  pub sport: String,
  /// Device document string for running workouts; absent for strength.
  #[serde(default)]
  pub json_body: Option<String>,
}

/// Roster row from getAthletes and getFlocks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
  pub name: String,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

/// One HTTP client plus config, built once at page load and passed into
/// every command.
#[derive(Debug, Clone)]
pub struct ApiClient {
  http: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Self {
    Self {
      http: Client::new(),
      config,
    }
  }

  fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
    let mut url = Url::parse(&self.config.base_url)
      .and_then(|base| base.join(path))
      .map_err(|e| ApiError::BadUrl(e.to_string()))?;

    url.query_pairs_mut().extend_pairs(query);
    Ok(url)
  }

  /// POST addUser. A 400 means the name is already taken.
  pub async fn add_user(&self, request: &CredentialsRequest) -> Result<AuthSuccess, ApiError> {
    let url = self.endpoint("/api/addUser", &[])?;
    let response = self.http.post(url).json(request).send().await?;

    if response.status() == StatusCode::BAD_REQUEST {
      return Err(ApiError::AccountExists);
    }
    let response = check_status(response).await?;
    parse_auth_body(response).await
  }

  /// POST verifyUser. Exchanges credentials for the account's api key.
  pub async fn verify_user(&self, request: &CredentialsRequest) -> Result<AuthSuccess, ApiError> {
    let url = self.endpoint("/api/verifyUser", &[])?;
    let response = self.http.post(url).json(request).send().await?;

    let response = check_status(response).await?;
    parse_auth_body(response).await
  }

  /// POST addWorkout. Schedules a running workout for an athlete or flock.
  pub async fn add_workout(
    &self,
    api_key: &str,
    request: &AddWorkoutRequest,
  ) -> Result<(), ApiError> {
    let url = self.endpoint("/api/addWorkout", &[("apiKey", api_key)])?;
    let response = self.http.post(url).json(request).send().await?;

    check_status(response).await?;
    Ok(())
  }

  /// POST addStrengthWorkout. The strength endpoint takes the drill payload
  /// directly, no device document involved.
  pub async fn add_strength_workout(
    &self,
    api_key: &str,
    payload: &StrengthWorkoutPayload,
  ) -> Result<(), ApiError> {
    let url = self.endpoint("/api/addStrengthWorkout", &[("apiKey", api_key)])?;
    let response = self.http.post(url).json(payload).send().await?;

    check_status(response).await?;
    Ok(())
  }

  /// GET getWorkouts. Scheduled workouts for the review page.
  pub async fn get_workouts(&self, api_key: &str) -> Result<Vec<ScheduledWorkout>, ApiError> {
    let url = self.endpoint("/api/getWorkouts", &[("apiKey", api_key)])?;
    let response = self.http.get(url).send().await?;

    let response = check_status(response).await?;
    parse_json(response).await
  }

  /// GET getSleepData over an inclusive date window.
  pub async fn get_sleep_data(
    &self,
    api_key: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<Vec<SleepNight>, ApiError> {
    let start = start_date.format("%Y-%m-%d").to_string();
    let end = end_date.format("%Y-%m-%d").to_string();
    let url = self.endpoint(
      "/api/getSleepData",
      &[("apiKey", api_key), ("startDate", &start), ("endDate", &end)],
    )?;
    let response = self.http.get(url).send().await?;

    let response = check_status(response).await?;
    parse_json(response).await
  }

  /// GET getAthletes. Athletes coached by this account.
  pub async fn get_athletes(&self, api_key: &str) -> Result<Vec<RosterEntry>, ApiError> {
    let url = self.endpoint("/api/getAthletes", &[("apiKey", api_key)])?;
    let response = self.http.get(url).send().await?;

    let response = check_status(response).await?;
    parse_json(response).await
  }

  /// GET getFlocks. Training groups owned by this account.
  pub async fn get_flocks(&self, api_key: &str) -> Result<Vec<RosterEntry>, ApiError> {
    let url = self.endpoint("/api/getFlocks", &[("apiKey", api_key)])?;
    let response = self.http.get(url).send().await?;

    let response = check_status(response).await?;
    parse_json(response).await
  }
}

/// Pass 2xx responses through, classify everything else.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().await.unwrap_or_default();
  Err(rejection(status.as_u16(), &body))
}

/// Parse a JSON body, keeping the raw text around for the log when the
/// shape is off.
async fn parse_json<T: serde::de::DeserializeOwned>(
  response: reqwest::Response,
) -> Result<T, ApiError> {
  let text = response.text().await?;

  serde_json::from_str(&text).map_err(|e| {
    let preview: String = text.chars().take(500).collect();
    tracing::warn!(error = %e, body = %preview, "unexpected API response shape");
    ApiError::Parse(e.to_string())
  })
}

/// The auth endpoints report bad credentials inside a 200 body, so a failed
/// parse of the success shape falls through to error classification.
async fn parse_auth_body(response: reqwest::Response) -> Result<AuthSuccess, ApiError> {
  let text = response.text().await?;

  if let Ok(success) = serde_json::from_str::<AuthSuccess>(&text) {
    return Ok(success);
  }
  Err(rejection(StatusCode::OK.as_u16(), &text))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
