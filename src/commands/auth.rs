//! Registration and login commands.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::api::{ApiClient, AuthSuccess, CredentialsRequest};
use crate::models::{LoginForm, RegistrationForm, UserSession};
use crate::validation::{validate_login, validate_registration};

use super::SubmitError;

/// Create an account and hand back a live session.
pub async fn register_user(
  client: &ApiClient,
  form: &RegistrationForm,
) -> Result<UserSession, SubmitError> {
  validate_registration(form).map_err(SubmitError::Validation)?;

  let request = CredentialsRequest {
    user_name: form.user_name.trim().to_string(),
    password_hash: hash_password(&form.password),
  };
  let success = client.add_user(&request).await?;

  info!(user = %success.user_name, "account created");
  Ok(session_from(success))
}

/// Exchange credentials for the account's api key.
pub async fn login_user(client: &ApiClient, form: &LoginForm) -> Result<UserSession, SubmitError> {
  validate_login(form).map_err(SubmitError::Validation)?;

  let request = CredentialsRequest {
    user_name: form.user_name.trim().to_string(),
    password_hash: hash_password(&form.password),
  };
  let success = client.verify_user(&request).await?;

  info!(user = %success.user_name, "signed in");
  Ok(session_from(success))
}

/// Hex SHA-256 of the password. The server only ever sees this digest.
fn hash_password(password: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(password.as_bytes());
  hex::encode(hasher.finalize())
}

fn session_from(success: AuthSuccess) -> UserSession {
  let display_name = success
    .display_name
    .unwrap_or_else(|| success.user_name.clone());

  UserSession {
    user_name: success.user_name,
    display_name,
    api_key: success.api_key,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
