//! Validated workout plans.
//!
//! These types come out of `validation` and go into `device`: a run step
//! always carries a pace target and a rest step never does, so the encoder
//! has nothing left to check.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Durations
/// ---------------------------------------------------------------------------

/// Whether a step runs for a span of time or a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
  Time,
  Distance,
}

/// The unit the user picked for a step's duration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
  Seconds,
  Minutes,
  Meters,
  Kilometers,
}

impl DurationUnit {
  /// The kind this unit measures.
  pub fn kind(&self) -> DurationKind {
    match self {
      DurationUnit::Seconds | DurationUnit::Minutes => DurationKind::Time,
      DurationUnit::Meters | DurationUnit::Kilometers => DurationKind::Distance,
    }
  }
}

/// A step's duration exactly as authored: `value` is in `unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDuration {
  pub kind: DurationKind,
  pub unit: DurationUnit,
  pub value: f64,
}

/// ---------------------------------------------------------------------------
/// Running Plans
/// ---------------------------------------------------------------------------

/// Pace target for a run step, in decimal minutes per kilometre. Validation
/// guarantees every pace in here is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaceTarget {
  /// Hold a single pace.
  Specific(f64),
  /// Stay between a faster (`low`) and a slower (`high`) pace; low <= high.
  Range { low: f64, high: f64 },
}

/// A single movement or recovery unit inside an interval block.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
  Run { duration: StepDuration, pace: PaceTarget },
  Rest { duration: StepDuration },
}

impl Step {
  pub fn duration(&self) -> &StepDuration {
    match self {
      Step::Run { duration, .. } | Step::Rest { duration } => duration,
    }
  }
}

/// An ordered group of steps executed `repeat_count` times in a row.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalBlock {
  /// Always >= 1.
  pub repeat_count: u32,
  /// Never empty.
  pub steps: Vec<Step>,
}

/// A validated running plan, ready for the device encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
  pub name: String,
  pub date: NaiveDate,
  pub description: String,
  pub blocks: Vec<IntervalBlock>,
}

/// ---------------------------------------------------------------------------
/// Strength Plans
/// ---------------------------------------------------------------------------

/// One strength drill: a named exercise done for sets x reps.
#[derive(Debug, Clone, PartialEq)]
pub struct Drill {
  pub name: String,
  /// Always >= 1.
  pub sets: u32,
  /// Always >= 1.
  pub reps: u32,
}

/// A validated strength plan.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthDraft {
  pub name: String,
  pub date: NaiveDate,
  pub description: String,
  pub drills: Vec<Drill>,
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
