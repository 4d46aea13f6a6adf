//! Device workout document assembly.
//!
//! Turns a validated running draft into the normalized JSON document the
//! device sync pipeline expects, and a strength draft into the drill payload
//! for the strength endpoint. Wire units are fixed: seconds, metres, metres
//! per second.

use serde::{Deserialize, Serialize};

use crate::models::{
  Drill, DurationKind, IntervalBlock, PaceTarget, Step, StrengthDraft, WorkoutDraft,
};
use crate::units;

const SPORT_RUNNING: &str = "RUNNING";
const TARGET_TYPE_PACE: &str = "PACE";
const STEP_TYPE_REPEAT: &str = "WorkoutRepeatStep";
const STEP_TYPE_SINGLE: &str = "WorkoutStep";
const REPEAT_UNTIL_STEPS: &str = "REPEAT_UNTIL_STEPS_CMPLT";
const GROUP_DESCRIPTION: &str = "Run";

/// ---------------------------------------------------------------------------
/// Wire Types
/// ---------------------------------------------------------------------------

/// Step intensity tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
  #[serde(rename = "INTERVAL")]
  Interval,
  #[serde(rename = "REST")]
  Rest,
}

/// Duration dimension tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceDurationType {
  #[serde(rename = "TIME")]
  Time,
  #[serde(rename = "DISTANCE")]
  Distance,
}

/// One entry in a device `steps` array. The sync pipeline uses a single
/// polymorphic record for repeat groups and leaf steps, discriminated by
/// `type`, and rejects documents with missing keys, so every field is
/// serialized on both levels and absent values become explicit nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStep {
  pub target_type: String,
  /// 1-based position among siblings.
  pub step_order: u32,
  /// Repeat count on groups, 0 on leaf steps.
  pub repeat_value: u32,
  #[serde(rename = "type")]
  pub step_type: String,
  pub description: String,
  pub duration_type: Option<DeviceDurationType>,
  pub duration_value: f64,
  pub intensity: Intensity,
  /// Speed in m/s. Holds the faster bound: pace and speed are inverses, so
  /// the low (faster) pace maps to the numerically larger speed.
  pub target_value_low: f64,
  pub target_value_high: f64,
  pub repeat_type: Option<String>,
  pub steps: Option<Vec<DeviceStep>>,
}

impl DeviceStep {
  /// A repeat group wrapping one interval block's children.
  fn repeat_group(order: u32, repeat_count: u32, children: Vec<DeviceStep>) -> Self {
    Self {
      target_type: TARGET_TYPE_PACE.to_string(),
      step_order: order,
      repeat_value: repeat_count,
      step_type: STEP_TYPE_REPEAT.to_string(),
      description: GROUP_DESCRIPTION.to_string(),
      duration_type: None,
      duration_value: 0.0,
      intensity: Intensity::Interval,
      target_value_low: 0.0,
      target_value_high: 0.0,
      repeat_type: Some(REPEAT_UNTIL_STEPS.to_string()),
      steps: Some(children),
    }
  }

  /// A leaf step inside a group.
  fn leaf(
    order: u32,
    description: &str,
    duration_type: DeviceDurationType,
    duration_value: f64,
    intensity: Intensity,
    target_value_low: f64,
    target_value_high: f64,
  ) -> Self {
    Self {
      target_type: TARGET_TYPE_PACE.to_string(),
      step_order: order,
      repeat_value: 0,
      step_type: STEP_TYPE_SINGLE.to_string(),
      description: description.to_string(),
      duration_type: Some(duration_type),
      duration_value,
      intensity,
      target_value_low,
      target_value_high,
      repeat_type: None,
      steps: None,
    }
  }
}

/// The full running document sent (JSON-string-encoded) to the sync API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceWorkoutDocument {
  pub sport: String,
  pub steps: Vec<DeviceStep>,
  pub workout_name: String,
  pub description: String,
}

/// ---------------------------------------------------------------------------
/// Running Encoder
/// ---------------------------------------------------------------------------

/// Encode a validated draft into the device document.
///
/// Total over its input: validation has already rejected empty blocks,
/// non-positive durations, and missing or non-positive paces, so nothing
/// here can fail. Every block becomes a repeat group, even for a single
/// pass, keeping the document shape uniform.
pub fn encode_running_workout(draft: &WorkoutDraft) -> DeviceWorkoutDocument {
  let steps = draft
    .blocks
    .iter()
    .enumerate()
    .map(|(index, block)| encode_block(block, index as u32 + 1))
    .collect();

  DeviceWorkoutDocument {
    sport: SPORT_RUNNING.to_string(),
    steps,
    workout_name: draft.name.clone(),
    description: draft.description.clone(),
  }
}

fn encode_block(block: &IntervalBlock, order: u32) -> DeviceStep {
  let children = block
    .steps
    .iter()
    .enumerate()
    .map(|(index, step)| encode_step(step, index as u32 + 1))
    .collect();

  DeviceStep::repeat_group(order, block.repeat_count, children)
}

fn encode_step(step: &Step, order: u32) -> DeviceStep {
  let duration = step.duration();
  let duration_type = match duration.kind {
    DurationKind::Time => DeviceDurationType::Time,
    DurationKind::Distance => DeviceDurationType::Distance,
  };
  let duration_value = units::duration_to_normalized(duration.value, duration.kind, duration.unit);

  match step {
    Step::Run { pace, .. } => {
      let (low, high) = pace_window(*pace);
      DeviceStep::leaf(
        order,
        "run",
        duration_type,
        duration_value,
        Intensity::Interval,
        low,
        high,
      )
    }
    Step::Rest { .. } => DeviceStep::leaf(
      order,
      "rest",
      duration_type,
      duration_value,
      Intensity::Rest,
      0.0,
      0.0,
    ),
  }
}

/// Speed bounds in m/s for a pace target. The faster pace lands in the low
/// field per the wire contract.
fn pace_window(pace: PaceTarget) -> (f64, f64) {
  match pace {
    PaceTarget::Specific(minutes) => {
      let speed = units::min_per_km_to_mps(minutes);
      (speed, speed)
    }
    PaceTarget::Range { low, high } => (
      units::min_per_km_to_mps(low),
      units::min_per_km_to_mps(high),
    ),
  }
}

/// ---------------------------------------------------------------------------
/// Strength Encoder
/// ---------------------------------------------------------------------------

/// Payload for the strength endpoint. It predates the running pipeline and
/// keeps its own field casing and MM/DD/YYYY dates; nothing is shared with
/// the running document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthWorkoutPayload {
  #[serde(rename = "WorkoutName")]
  pub workout_name: String,
  #[serde(rename = "WorkoutDescription")]
  pub workout_description: String,
  #[serde(rename = "WorkoutDate")]
  pub workout_date: String,
  #[serde(rename = "WorkoutDrills")]
  pub workout_drills: Vec<StrengthDrillRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthDrillRecord {
  #[serde(rename = "DrillName")]
  pub drill_name: String,
  #[serde(rename = "DrillSets")]
  pub drill_sets: u32,
  #[serde(rename = "DrillReps")]
  pub drill_reps: u32,
}

impl StrengthDrillRecord {
  fn from_drill(drill: &Drill) -> Self {
    Self {
      drill_name: drill.name.clone(),
      drill_sets: drill.sets,
      drill_reps: drill.reps,
    }
  }
}

/// Encode a validated strength draft for the strength endpoint.
pub fn encode_strength_workout(draft: &StrengthDraft) -> StrengthWorkoutPayload {
  StrengthWorkoutPayload {
    workout_name: draft.name.clone(),
    workout_description: draft.description.clone(),
    workout_date: draft.date.format("%m/%d/%Y").to_string(),
    workout_drills: draft.drills.iter().map(StrengthDrillRecord::from_drill).collect(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
