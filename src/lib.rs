//! Core client logic for the FlockFit coaching app.
//!
//! The web UI renders pages; this crate does the work behind them: form
//! state and validation, the device workout encoder, and the calls to the
//! FlockFit API. Commands take their dependencies (API client, session) as
//! arguments; there is no ambient state in here.

pub mod api;
pub mod commands;
pub mod device;
pub mod models;
pub mod units;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiConfig, ApiError};
pub use commands::{SubmitError, WorkoutSubmission};
pub use models::UserSession;
