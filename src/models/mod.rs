pub mod draft;
pub mod forms;
pub mod session;
pub mod sleep;

pub use draft::{
  Drill, DurationKind, DurationUnit, IntervalBlock, PaceTarget, Step, StepDuration, StrengthDraft,
  WorkoutDraft,
};
pub use forms::{
  BlockForm, DrillForm, LoginForm, PaceMode, RegistrationForm, RunningWorkoutForm, StepForm,
  StepKind, StrengthWorkoutForm,
};
pub use session::UserSession;
pub use sleep::{SleepNight, SleepSummary};
