//! Sleep data shown on the athlete dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::units;

/// Nightly sleep target used for the debt calculation, in hours.
const SLEEP_TARGET_HOURS: f64 = 8.0;

/// How many recent nights feed the rolling average and debt figures.
const ROLLING_WINDOW_NIGHTS: usize = 7;

/// ---------------------------------------------------------------------------
/// Nightly Rows
/// ---------------------------------------------------------------------------

/// One night of sleep as the API reports it, stage durations in seconds.
/// Stage breakdowns and scores are absent for athletes without a wearable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepNight {
  pub date: NaiveDate,
  pub total_sleep_seconds: i64,
  #[serde(default)]
  pub deep_sleep_seconds: Option<i64>,
  #[serde(default)]
  pub rem_sleep_seconds: Option<i64>,
  #[serde(default)]
  pub light_sleep_seconds: Option<i64>,
  #[serde(default)]
  pub sleep_score: Option<i64>,
}

impl SleepNight {
  /// Total sleep formatted for the table cell, e.g. "7h 32m".
  pub fn total_display(&self) -> String {
    units::seconds_to_hours_minutes(self.total_sleep_seconds)
  }
}

/// ---------------------------------------------------------------------------
/// Dashboard Roll-up
/// ---------------------------------------------------------------------------

/// Aggregates over the fetched window, nights ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
  pub nights: Vec<SleepNight>,
  /// Average over the most recent nights in the window, in hours.
  pub avg_sleep_hours: Option<f64>,
  /// Cumulative shortfall against the nightly target over those nights.
  /// None when the athlete is at or over target.
  pub sleep_debt_hours: Option<f64>,
}

impl SleepSummary {
  pub fn from_nights(mut nights: Vec<SleepNight>) -> Self {
    nights.sort_by_key(|night| night.date);

    let recent_hours: Vec<f64> = nights
      .iter()
      .rev()
      .take(ROLLING_WINDOW_NIGHTS)
      .map(|night| night.total_sleep_seconds as f64 / 3600.0)
      .collect();

    let avg_sleep_hours = if recent_hours.is_empty() {
      None
    } else {
      Some(recent_hours.iter().sum::<f64>() / recent_hours.len() as f64)
    };

    // Debt only accumulates under target; surplus sleep does not bank.
    let sleep_debt_hours = avg_sleep_hours.and_then(|avg| {
      let shortfall = (SLEEP_TARGET_HOURS - avg) * recent_hours.len() as f64;
      if shortfall > 0.0 {
        Some(shortfall)
      } else {
        None
      }
    });

    Self {
      nights,
      avg_sleep_hours,
      sleep_debt_hours,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
