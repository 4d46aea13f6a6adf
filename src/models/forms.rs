//! Form state for the workout, registration, and login pages.
//!
//! Everything here is "as typed": pace fields hold raw text, numbers the
//! user has not entered yet are `None`. Blocks, steps, and drills carry
//! stable ids so edits and validation issues can address them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::draft::{DurationKind, DurationUnit};

/// ---------------------------------------------------------------------------
/// Running Workout Form
/// ---------------------------------------------------------------------------

/// Whether a run step holds one pace or a pace window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceMode {
  Specific,
  Range,
}

/// Run or rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
  Run,
  Rest,
}

/// One step row on the running form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepForm {
  pub id: Uuid,
  pub kind: StepKind,
  pub duration_kind: DurationKind,
  pub duration_unit: DurationUnit,
  pub duration_value: Option<f64>,
  pub pace_mode: PaceMode,
  /// Raw "mm:ss" text. Ignored (possibly stale) while `kind` is Rest.
  pub pace: String,
  pub pace_low: String,
  pub pace_high: String,
}

impl StepForm {
  /// A fresh run step with nothing filled in.
  pub fn run() -> Self {
    Self {
      id: Uuid::new_v4(),
      kind: StepKind::Run,
      duration_kind: DurationKind::Time,
      duration_unit: DurationUnit::Minutes,
      duration_value: None,
      pace_mode: PaceMode::Specific,
      pace: String::new(),
      pace_low: String::new(),
      pace_high: String::new(),
    }
  }

  /// A fresh rest step.
  pub fn rest() -> Self {
    Self {
      kind: StepKind::Rest,
      ..Self::run()
    }
  }
}

/// One interval block on the running form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockForm {
  pub id: Uuid,
  pub repeat_count: u32,
  pub steps: Vec<StepForm>,
}

impl BlockForm {
  /// A fresh block holding one empty run step.
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4(),
      repeat_count: 1,
      steps: vec![StepForm::run()],
    }
  }

  pub fn add_step(&mut self, step: StepForm) {
    self.steps.push(step);
  }

  /// Replace the step with the same id. Returns false if no step matches.
  pub fn update_step(&mut self, step: StepForm) -> bool {
    match self.steps.iter_mut().find(|existing| existing.id == step.id) {
      Some(slot) => {
        *slot = step;
        true
      }
      None => false,
    }
  }

  /// Remove the step with the given id. Returns false if no step matches.
  pub fn remove_step(&mut self, id: Uuid) -> bool {
    let before = self.steps.len();
    self.steps.retain(|step| step.id != id);
    self.steps.len() != before
  }
}

impl Default for BlockForm {
  fn default() -> Self {
    Self::new()
  }
}

/// State of the running-workout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningWorkoutForm {
  pub name: String,
  pub date: Option<NaiveDate>,
  pub description: String,
  /// Athlete or flock the workout is assigned to.
  pub target_name: String,
  pub target_is_flock: bool,
  pub blocks: Vec<BlockForm>,
}

impl RunningWorkoutForm {
  /// A fresh form with one empty block, matching what the page first shows.
  pub fn new() -> Self {
    Self {
      name: String::new(),
      date: None,
      description: String::new(),
      target_name: String::new(),
      target_is_flock: false,
      blocks: vec![BlockForm::new()],
    }
  }

  pub fn add_block(&mut self, block: BlockForm) {
    self.blocks.push(block);
  }

  /// Replace the block with the same id. Returns false if no block matches.
  pub fn update_block(&mut self, block: BlockForm) -> bool {
    match self.blocks.iter_mut().find(|existing| existing.id == block.id) {
      Some(slot) => {
        *slot = block;
        true
      }
      None => false,
    }
  }

  /// Remove the block with the given id. Returns false if no block matches.
  pub fn remove_block(&mut self, id: Uuid) -> bool {
    let before = self.blocks.len();
    self.blocks.retain(|block| block.id != id);
    self.blocks.len() != before
  }
}

impl Default for RunningWorkoutForm {
  fn default() -> Self {
    Self::new()
  }
}

/// ---------------------------------------------------------------------------
/// Strength Workout Form
/// ---------------------------------------------------------------------------

/// One drill row on the strength form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillForm {
  pub id: Uuid,
  pub name: String,
  pub sets: Option<u32>,
  pub reps: Option<u32>,
}

impl DrillForm {
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4(),
      name: String::new(),
      sets: None,
      reps: None,
    }
  }
}

impl Default for DrillForm {
  fn default() -> Self {
    Self::new()
  }
}

/// State of the strength-workout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthWorkoutForm {
  pub name: String,
  pub date: Option<NaiveDate>,
  pub description: String,
  pub drills: Vec<DrillForm>,
}

impl StrengthWorkoutForm {
  /// A fresh form with one empty drill row.
  pub fn new() -> Self {
    Self {
      name: String::new(),
      date: None,
      description: String::new(),
      drills: vec![DrillForm::new()],
    }
  }

  pub fn add_drill(&mut self, drill: DrillForm) {
    self.drills.push(drill);
  }

  /// Replace the drill with the same id. Returns false if no drill matches.
  pub fn update_drill(&mut self, drill: DrillForm) -> bool {
    match self.drills.iter_mut().find(|existing| existing.id == drill.id) {
      Some(slot) => {
        *slot = drill;
        true
      }
      None => false,
    }
  }

  /// Remove the drill with the given id. Returns false if no drill matches.
  pub fn remove_drill(&mut self, id: Uuid) -> bool {
    let before = self.drills.len();
    self.drills.retain(|drill| drill.id != id);
    self.drills.len() != before
  }
}

impl Default for StrengthWorkoutForm {
  fn default() -> Self {
    Self::new()
  }
}

/// ---------------------------------------------------------------------------
/// Account Forms
/// ---------------------------------------------------------------------------

/// State of the registration page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
  pub user_name: String,
  pub password: String,
  pub confirm_password: String,
}

/// State of the login page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
  pub user_name: String,
  pub password: String,
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_form_starts_with_one_block_and_step() {
    let form = RunningWorkoutForm::new();
    assert_eq!(form.blocks.len(), 1);
    assert_eq!(form.blocks[0].steps.len(), 1);
    assert_eq!(form.blocks[0].repeat_count, 1);
    assert_eq!(form.blocks[0].steps[0].kind, StepKind::Run);
  }

  #[test]
  fn test_update_step_replaces_matching_id() {
    let mut block = BlockForm::new();
    let mut edited = block.steps[0].clone();
    edited.duration_value = Some(400.0);
    edited.duration_kind = DurationKind::Distance;
    edited.duration_unit = DurationUnit::Meters;

    assert!(block.update_step(edited.clone()));
    assert_eq!(block.steps[0], edited);
  }

  #[test]
  fn test_update_step_with_unknown_id_is_a_noop() {
    let mut block = BlockForm::new();
    let original = block.steps.clone();

    assert!(!block.update_step(StepForm::run()));
    assert_eq!(block.steps, original);
  }

  #[test]
  fn test_remove_step_by_id() {
    let mut block = BlockForm::new();
    let rest = StepForm::rest();
    let rest_id = rest.id;
    block.add_step(rest);
    assert_eq!(block.steps.len(), 2);

    assert!(block.remove_step(rest_id));
    assert_eq!(block.steps.len(), 1);
    assert!(!block.remove_step(rest_id));
  }

  #[test]
  fn test_block_edits_address_by_id() {
    let mut form = RunningWorkoutForm::new();
    let second = BlockForm::new();
    let second_id = second.id;
    form.add_block(second);

    let mut edited = form.blocks[1].clone();
    edited.repeat_count = 5;
    assert!(form.update_block(edited));
    assert_eq!(form.blocks[1].repeat_count, 5);

    assert!(form.remove_block(second_id));
    assert_eq!(form.blocks.len(), 1);
  }

  #[test]
  fn test_drill_edits_address_by_id() {
    let mut form = StrengthWorkoutForm::new();
    let mut edited = form.drills[0].clone();
    edited.name = "Goblet squat".to_string();
    edited.sets = Some(3);
    edited.reps = Some(10);

    assert!(form.update_drill(edited.clone()));
    assert_eq!(form.drills[0], edited);

    assert!(form.remove_drill(edited.id));
    assert!(form.drills.is_empty());
  }

  #[test]
  fn test_fresh_steps_get_distinct_ids() {
    assert_ne!(StepForm::run().id, StepForm::run().id);
  }
}
