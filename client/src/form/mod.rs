pub mod autosave;
pub mod draft;
pub mod fields;
pub mod occurrence;
pub mod prompt;
pub mod reconciler;
pub mod session;

pub use autosave::ScheduleAutosave;
pub use draft::ScheduleDraft;
pub use fields::{FormDefaults, FormFields};
pub use occurrence::{resolve_occurrence_date, RecurringSaveChoice};
pub use prompt::ConfirmationPrompt;
pub use reconciler::{EffectiveSchedule, InitialValues};
pub use session::{FormMode, FormRoute, FormSession, SaveOutcome};
