//! Authenticated session state, produced by login and owned by the caller.

use serde::{Deserialize, Serialize};

/// Credentials for one signed-in account.
///
/// Where this gets stored is the embedding page's concern; commands only
/// borrow it for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
  pub user_name: String,
  /// Name shown in the header; falls back to `user_name` at login.
  pub display_name: String,
  /// Key sent as the `apiKey` query parameter on authenticated calls.
  pub api_key: String,
}
