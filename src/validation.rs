//! Submission-time validation.
//!
//! Turns raw form state into validated drafts, collecting the complete set
//! of problems per attempt. The pages show every issue at once, keyed to
//! the offending block, step, or drill, so nothing here returns early.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{
  BlockForm, Drill, IntervalBlock, LoginForm, PaceMode, PaceTarget, RegistrationForm,
  RunningWorkoutForm, Step, StepDuration, StepForm, StepKind, StrengthDraft, StrengthWorkoutForm,
  WorkoutDraft,
};
use crate::units;

const MIN_PASSWORD_CHARS: usize = 8;

/// ---------------------------------------------------------------------------
/// Issue Reporting
/// ---------------------------------------------------------------------------

/// Which input an issue points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
  Name,
  Date,
  Target,
  Blocks,
  RepeatCount,
  Steps,
  DurationValue,
  DurationUnit,
  Pace,
  PaceLow,
  PaceHigh,
  PaceRange,
  Drills,
  DrillName,
  DrillSets,
  DrillReps,
  UserName,
  Password,
  ConfirmPassword,
}

/// One inline error, addressed to a form entity by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
  pub field: FormField,
  /// Id of the block, step, or drill the field belongs to. None for
  /// top-level fields like the workout name.
  pub entity_id: Option<Uuid>,
  pub message: String,
}

impl ValidationIssue {
  fn top(field: FormField, message: &str) -> Self {
    Self {
      field,
      entity_id: None,
      message: message.to_string(),
    }
  }

  fn at(entity_id: Uuid, field: FormField, message: &str) -> Self {
    Self {
      field,
      entity_id: Some(entity_id),
      message: message.to_string(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Running Workouts
/// ---------------------------------------------------------------------------

/// Validate the running form. Either every field converts and a draft comes
/// back, or the full list of issues does.
pub fn validate_running_form(form: &RunningWorkoutForm) -> Result<WorkoutDraft, Vec<ValidationIssue>> {
  let mut issues = Vec::new();

  if form.name.trim().is_empty() {
    issues.push(ValidationIssue::top(FormField::Name, "Workout name is required"));
  }
  if form.date.is_none() {
    issues.push(ValidationIssue::top(FormField::Date, "Pick a date for the workout"));
  }
  if form.target_name.trim().is_empty() {
    issues.push(ValidationIssue::top(FormField::Target, "Choose an athlete or flock"));
  }
  if form.blocks.is_empty() {
    issues.push(ValidationIssue::top(FormField::Blocks, "Add at least one interval block"));
  }

  let blocks: Vec<IntervalBlock> = form
    .blocks
    .iter()
    .filter_map(|block| convert_block(block, &mut issues))
    .collect();

  if !issues.is_empty() {
    return Err(issues);
  }

  Ok(WorkoutDraft {
    name: form.name.trim().to_string(),
    // Presence was checked above; an empty issue list means Some.
    date: form.date.unwrap_or_default(),
    description: form.description.trim().to_string(),
    blocks,
  })
}

fn convert_block(block: &BlockForm, issues: &mut Vec<ValidationIssue>) -> Option<IntervalBlock> {
  let before = issues.len();

  if block.repeat_count < 1 {
    issues.push(ValidationIssue::at(
      block.id,
      FormField::RepeatCount,
      "Repeat count must be at least 1",
    ));
  }
  if block.steps.is_empty() {
    issues.push(ValidationIssue::at(
      block.id,
      FormField::Steps,
      "Each block needs at least one step",
    ));
  }

  let steps: Vec<Step> = block
    .steps
    .iter()
    .filter_map(|step| convert_step(step, issues))
    .collect();

  if issues.len() > before {
    return None;
  }

  Some(IntervalBlock {
    repeat_count: block.repeat_count,
    steps,
  })
}

fn convert_step(step: &StepForm, issues: &mut Vec<ValidationIssue>) -> Option<Step> {
  let duration = convert_duration(step, issues);

  match step.kind {
    // Stale pace text on a rest step is ignored, not reported.
    StepKind::Rest => duration.map(|duration| Step::Rest { duration }),
    StepKind::Run => {
      let pace = convert_pace(step, issues);
      match (duration, pace) {
        (Some(duration), Some(pace)) => Some(Step::Run { duration, pace }),
        _ => None,
      }
    }
  }
}

fn convert_duration(step: &StepForm, issues: &mut Vec<ValidationIssue>) -> Option<StepDuration> {
  let value = match step.duration_value {
    Some(value) if value > 0.0 => Some(value),
    Some(_) => {
      issues.push(ValidationIssue::at(
        step.id,
        FormField::DurationValue,
        "Duration must be greater than zero",
      ));
      None
    }
    None => {
      issues.push(ValidationIssue::at(
        step.id,
        FormField::DurationValue,
        "Enter a duration",
      ));
      None
    }
  };

  if step.duration_unit.kind() != step.duration_kind {
    issues.push(ValidationIssue::at(
      step.id,
      FormField::DurationUnit,
      "Duration unit does not match the selected measure",
    ));
    return None;
  }

  value.map(|value| StepDuration {
    kind: step.duration_kind,
    unit: step.duration_unit,
    value,
  })
}

fn convert_pace(step: &StepForm, issues: &mut Vec<ValidationIssue>) -> Option<PaceTarget> {
  match step.pace_mode {
    PaceMode::Specific => {
      parse_pace_field(step.id, &step.pace, FormField::Pace, issues).map(PaceTarget::Specific)
    }
    PaceMode::Range => {
      let low = parse_pace_field(step.id, &step.pace_low, FormField::PaceLow, issues);
      let high = parse_pace_field(step.id, &step.pace_high, FormField::PaceHigh, issues);

      match (low, high) {
        (Some(low), Some(high)) if low <= high => Some(PaceTarget::Range { low, high }),
        (Some(_), Some(_)) => {
          issues.push(ValidationIssue::at(
            step.id,
            FormField::PaceRange,
            "Pace range is inverted: the faster pace goes first",
          ));
          None
        }
        _ => None,
      }
    }
  }
}

/// Parse one pace text field, enforcing the encoder's pace > 0 precondition.
fn parse_pace_field(
  step_id: Uuid,
  text: &str,
  field: FormField,
  issues: &mut Vec<ValidationIssue>,
) -> Option<f64> {
  match units::pace_string_to_minutes(text) {
    None => {
      issues.push(ValidationIssue::at(step_id, field, "Enter a pace as mm:ss"));
      None
    }
    Some(minutes) if minutes <= 0.0 => {
      issues.push(ValidationIssue::at(
        step_id,
        field,
        "Pace must be faster than 0:00",
      ));
      None
    }
    Some(minutes) => Some(minutes),
  }
}

/// ---------------------------------------------------------------------------
/// Strength Workouts
/// ---------------------------------------------------------------------------

/// Validate the strength form into a draft, same all-issues contract as the
/// running validator.
pub fn validate_strength_form(
  form: &StrengthWorkoutForm,
) -> Result<StrengthDraft, Vec<ValidationIssue>> {
  let mut issues = Vec::new();

  if form.name.trim().is_empty() {
    issues.push(ValidationIssue::top(FormField::Name, "Workout name is required"));
  }
  if form.date.is_none() {
    issues.push(ValidationIssue::top(FormField::Date, "Pick a date for the workout"));
  }
  if form.drills.is_empty() {
    issues.push(ValidationIssue::top(FormField::Drills, "Add at least one drill"));
  }

  let drills: Vec<Drill> = form
    .drills
    .iter()
    .filter_map(|drill| {
      let before = issues.len();

      if drill.name.trim().is_empty() {
        issues.push(ValidationIssue::at(
          drill.id,
          FormField::DrillName,
          "Name the drill",
        ));
      }
      let sets = positive_count(drill.id, drill.sets, FormField::DrillSets, "sets", &mut issues);
      let reps = positive_count(drill.id, drill.reps, FormField::DrillReps, "reps", &mut issues);

      if issues.len() > before {
        return None;
      }

      Some(Drill {
        name: drill.name.trim().to_string(),
        sets: sets?,
        reps: reps?,
      })
    })
    .collect();

  if !issues.is_empty() {
    return Err(issues);
  }

  Ok(StrengthDraft {
    name: form.name.trim().to_string(),
    // Presence was checked above; an empty issue list means Some.
    date: form.date.unwrap_or_default(),
    description: form.description.trim().to_string(),
    drills,
  })
}

fn positive_count(
  drill_id: Uuid,
  value: Option<u32>,
  field: FormField,
  label: &str,
  issues: &mut Vec<ValidationIssue>,
) -> Option<u32> {
  match value {
    Some(count) if count >= 1 => Some(count),
    Some(_) => {
      issues.push(ValidationIssue::at(
        drill_id,
        field,
        &format!("Number of {} must be at least 1", label),
      ));
      None
    }
    None => {
      issues.push(ValidationIssue::at(
        drill_id,
        field,
        &format!("Enter the number of {}", label),
      ));
      None
    }
  }
}

/// ---------------------------------------------------------------------------
/// Account Forms
/// ---------------------------------------------------------------------------

/// Validate the registration form. The command layer hashes the password
/// after this passes.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), Vec<ValidationIssue>> {
  let mut issues = Vec::new();

  if form.user_name.trim().is_empty() {
    issues.push(ValidationIssue::top(FormField::UserName, "User name is required"));
  }
  if form.password.is_empty() {
    issues.push(ValidationIssue::top(FormField::Password, "Password is required"));
  } else if form.password.chars().count() < MIN_PASSWORD_CHARS {
    issues.push(ValidationIssue::top(
      FormField::Password,
      "Password must be at least 8 characters",
    ));
  }
  if form.confirm_password != form.password {
    issues.push(ValidationIssue::top(
      FormField::ConfirmPassword,
      "Passwords do not match",
    ));
  }

  if issues.is_empty() {
    Ok(())
  } else {
    Err(issues)
  }
}

/// Validate the login form.
pub fn validate_login(form: &LoginForm) -> Result<(), Vec<ValidationIssue>> {
  let mut issues = Vec::new();

  if form.user_name.trim().is_empty() {
    issues.push(ValidationIssue::top(FormField::UserName, "User name is required"));
  }
  if form.password.is_empty() {
    issues.push(ValidationIssue::top(FormField::Password, "Password is required"));
  }

  if issues.is_empty() {
    Ok(())
  } else {
    Err(issues)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::{DurationKind, DurationUnit};
  use crate::test_utils::{date, running_form, strength_form};

  fn issue_fields(issues: &[ValidationIssue]) -> Vec<FormField> {
    issues.iter().map(|issue| issue.field).collect()
  }

  #[test]
  fn test_valid_running_form_converts_to_draft() {
    let form = running_form();

    let draft = validate_running_form(&form).unwrap();

    assert_eq!(draft.name, "Tempo Tuesday");
    assert_eq!(draft.date, date(2024, 1, 14));
    assert_eq!(draft.blocks.len(), 1);
    let block = &draft.blocks[0];
    assert_eq!(block.repeat_count, 3);
    assert_eq!(block.steps.len(), 2);

    match &block.steps[0] {
      Step::Run { duration, pace } => {
        assert_eq!(duration.kind, DurationKind::Distance);
        assert_eq!(duration.value, 400.0);
        match pace {
          PaceTarget::Specific(minutes) => assert_approx_eq!(*minutes, 4.5, 1e-9),
          other => panic!("expected specific pace, got {:?}", other),
        }
      }
      other => panic!("expected run step, got {:?}", other),
    }
    assert!(matches!(&block.steps[1], Step::Rest { .. }));
  }

  #[test]
  fn test_all_issues_are_collected_in_one_pass() {
    // Empty name, no date, no target, and an empty block list: four
    // distinct problems, all reported together.
    let form = RunningWorkoutForm {
      name: "  ".to_string(),
      date: None,
      description: String::new(),
      target_name: String::new(),
      target_is_flock: false,
      blocks: Vec::new(),
    };

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 4);
    let fields = issue_fields(&issues);
    assert!(fields.contains(&FormField::Name));
    assert!(fields.contains(&FormField::Date));
    assert!(fields.contains(&FormField::Target));
    assert!(fields.contains(&FormField::Blocks));
  }

  #[test]
  fn test_step_issues_carry_the_step_id() {
    let mut form = running_form();
    let step_id = form.blocks[0].steps[0].id;
    form.blocks[0].steps[0].duration_value = None;
    form.blocks[0].steps[0].pace = "fast".to_string();

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 2);
    for issue in &issues {
      assert_eq!(issue.entity_id, Some(step_id));
    }
    let fields = issue_fields(&issues);
    assert!(fields.contains(&FormField::DurationValue));
    assert!(fields.contains(&FormField::Pace));
  }

  #[test]
  fn test_run_step_requires_a_pace() {
    let mut form = running_form();
    form.blocks[0].steps[0].pace = String::new();

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::Pace);
  }

  #[test]
  fn test_zero_pace_is_rejected() {
    let mut form = running_form();
    form.blocks[0].steps[0].pace = "0:00".to_string();

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "Pace must be faster than 0:00");
  }

  #[test]
  fn test_rest_step_ignores_stale_pace_text() {
    let mut form = running_form();
    // A step switched from run to rest keeps whatever pace text it had.
    form.blocks[0].steps[1].pace = "not a pace".to_string();

    assert!(validate_running_form(&form).is_ok());
  }

  #[test]
  fn test_inverted_pace_range_is_rejected() {
    let mut form = running_form();
    let step = &mut form.blocks[0].steps[0];
    step.pace_mode = PaceMode::Range;
    step.pace_low = "5:00".to_string();
    step.pace_high = "4:00".to_string();

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::PaceRange);
  }

  #[test]
  fn test_equal_range_bounds_are_allowed() {
    let mut form = running_form();
    let step = &mut form.blocks[0].steps[0];
    step.pace_mode = PaceMode::Range;
    step.pace_low = "4:30".to_string();
    step.pace_high = "4:30".to_string();

    let draft = validate_running_form(&form).unwrap();

    match &draft.blocks[0].steps[0] {
      Step::Run { pace: PaceTarget::Range { low, high }, .. } => {
        assert_eq!(low, high);
      }
      other => panic!("expected range pace, got {:?}", other),
    }
  }

  #[test]
  fn test_range_mode_reports_each_bad_bound() {
    let mut form = running_form();
    let step = &mut form.blocks[0].steps[0];
    step.pace_mode = PaceMode::Range;
    step.pace_low = String::new();
    step.pace_high = "4:99".to_string();

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 2);
    let fields = issue_fields(&issues);
    assert!(fields.contains(&FormField::PaceLow));
    assert!(fields.contains(&FormField::PaceHigh));
  }

  #[test]
  fn test_zero_repeat_count_is_rejected() {
    let mut form = running_form();
    form.blocks[0].repeat_count = 0;

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::RepeatCount);
    assert_eq!(issues[0].entity_id, Some(form.blocks[0].id));
  }

  #[test]
  fn test_empty_block_is_rejected() {
    let mut form = running_form();
    form.blocks[0].steps.clear();

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::Steps);
  }

  #[test]
  fn test_mismatched_duration_unit_is_rejected() {
    let mut form = running_form();
    form.blocks[0].steps[0].duration_kind = DurationKind::Time;
    form.blocks[0].steps[0].duration_unit = DurationUnit::Meters;

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::DurationUnit);
  }

  #[test]
  fn test_issues_span_multiple_blocks() {
    let mut form = running_form();
    let mut second = form.blocks[0].clone();
    second.id = Uuid::new_v4();
    second.repeat_count = 0;
    form.add_block(second);
    form.blocks[0].steps[0].duration_value = Some(-1.0);

    let issues = validate_running_form(&form).unwrap_err();

    assert_eq!(issues.len(), 2);
    let fields = issue_fields(&issues);
    assert!(fields.contains(&FormField::DurationValue));
    assert!(fields.contains(&FormField::RepeatCount));
  }

  #[test]
  fn test_valid_strength_form_converts_to_draft() {
    let form = strength_form();

    let draft = validate_strength_form(&form).unwrap();

    assert_eq!(draft.name, "Hill strength");
    assert_eq!(draft.drills.len(), 2);
    assert_eq!(draft.drills[0].name, "Goblet squat");
    assert_eq!(draft.drills[0].sets, 3);
    assert_eq!(draft.drills[0].reps, 10);
  }

  #[test]
  fn test_strength_drill_issues_are_collected() {
    let mut form = strength_form();
    form.drills[0].name = String::new();
    form.drills[0].sets = Some(0);
    form.drills[1].reps = None;

    let issues = validate_strength_form(&form).unwrap_err();

    assert_eq!(issues.len(), 3);
    let fields = issue_fields(&issues);
    assert!(fields.contains(&FormField::DrillName));
    assert!(fields.contains(&FormField::DrillSets));
    assert!(fields.contains(&FormField::DrillReps));
    assert_eq!(issues[0].entity_id, Some(form.drills[0].id));
  }

  #[test]
  fn test_strength_form_requires_a_drill() {
    let mut form = strength_form();
    form.drills.clear();

    let issues = validate_strength_form(&form).unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::Drills);
  }

  #[test]
  fn test_registration_rules() {
    let form = RegistrationForm {
      user_name: String::new(),
      password: "short".to_string(),
      confirm_password: "different".to_string(),
    };

    let issues = validate_registration(&form).unwrap_err();

    assert_eq!(issues.len(), 3);
    let fields = issue_fields(&issues);
    assert!(fields.contains(&FormField::UserName));
    assert!(fields.contains(&FormField::Password));
    assert!(fields.contains(&FormField::ConfirmPassword));
  }

  #[test]
  fn test_registration_accepts_matching_long_password() {
    let form = RegistrationForm {
      user_name: "coach_anna".to_string(),
      password: "correct horse battery".to_string(),
      confirm_password: "correct horse battery".to_string(),
    };

    assert!(validate_registration(&form).is_ok());
  }

  #[test]
  fn test_login_requires_both_fields() {
    let form = LoginForm {
      user_name: String::new(),
      password: String::new(),
    };

    let issues = validate_login(&form).unwrap_err();

    assert_eq!(issues.len(), 2);
  }

  #[test]
  fn test_login_accepts_filled_form() {
    let form = LoginForm {
      user_name: "coach_anna".to_string(),
      password: "correct horse battery".to_string(),
    };

    assert!(validate_login(&form).is_ok());
  }
}
