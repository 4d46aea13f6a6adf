//! Sleep dashboard command.

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{SleepSummary, UserSession};

/// Fetch the athlete's nights over an inclusive window and fold in the
/// dashboard aggregates.
pub async fn load_sleep_summary(
  client: &ApiClient,
  session: &UserSession,
  start_date: NaiveDate,
  end_date: NaiveDate,
) -> Result<SleepSummary, ApiError> {
  let nights = client
    .get_sleep_data(&session.api_key, start_date, end_date)
    .await?;

  debug!(nights = nights.len(), %start_date, %end_date, "sleep window loaded");
  Ok(SleepSummary::from_nights(nights))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
