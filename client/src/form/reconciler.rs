use chrono::{DateTime, Utc};

use dailyflo::{
    list::TaskListId,
    task::{ReminderId, TaskColor, TaskPriority, TimeOfDay},
};

use crate::DailyfloClientError;

use super::{FormDefaults, FormFields, ScheduleDraft};

/// The single source of truth the form renders for the schedule fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSchedule {
    pub due_date: DateTime<Utc>,
    pub time: Option<TimeOfDay>,
    pub duration: u32,
    pub alerts: Vec<ReminderId>,
}

/// Merge rule: draft value if present, else the locally cached field value,
/// else a computed default (the current timestamp for the due date).
pub fn effective_schedule(
    draft: &ScheduleDraft,
    fields: &FormFields,
    now: DateTime<Utc>,
) -> EffectiveSchedule {
    EffectiveSchedule {
        due_date: draft.due_date().or(fields.due_date).unwrap_or(now),
        time: draft.time().or(fields.time),
        duration: draft.duration().or(fields.duration).unwrap_or(0),
        alerts: if draft.has_alerts() {
            draft.alerts().to_vec()
        } else {
            fields.alerts.clone()
        },
    }
}

/// Snapshot of the non-schedule fields captured once when the task is first
/// loaded into the form. Schedule fields are deliberately excluded because
/// they auto-save independently of the explicit save action.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialValues {
    title: String,
    description: String,
    color: TaskColor,
    icon: Option<String>,
    list: Option<TaskListId>,
    priority: TaskPriority,
    subtasks: Vec<(String, bool)>,
}

impl InitialValues {
    pub fn capture(fields: &FormFields) -> InitialValues {
        InitialValues {
            title: fields.title.clone(),
            description: fields.description.clone(),
            color: fields.color,
            icon: fields.icon.clone(),
            list: fields.list,
            priority: fields.priority,
            subtasks: fields
                .subtasks
                .iter()
                .map(|subtask| (subtask.title.clone(), subtask.is_completed))
                .collect(),
        }
    }

    /// The edit-mode dirty check. Subtasks are compared by index, on title
    /// and completion only.
    pub fn differs_from(&self, fields: &FormFields) -> bool {
        if self.title != fields.title
            || self.description != fields.description
            || self.color != fields.color
            || self.icon != fields.icon
            || self.list != fields.list
            || self.priority != fields.priority
        {
            return true;
        }

        if self.subtasks.len() != fields.subtasks.len() {
            return true;
        }

        self.subtasks
            .iter()
            .zip(fields.subtasks.iter())
            .any(|(snapshot, subtask)| {
                snapshot.0 != subtask.title || snapshot.1 != subtask.is_completed
            })
    }
}

/// The create-mode dirty check: anything typed, anything moved off the
/// theme-derived defaults, or any subtask added.
pub fn create_mode_is_dirty(fields: &FormFields, defaults: &FormDefaults) -> bool {
    !fields.title.is_empty()
        || !fields.description.is_empty()
        || fields.color != defaults.color
        || fields.icon != defaults.icon
        || fields.priority != defaults.priority
        || fields.list != defaults.list
        || fields.routine_type != defaults.routine_type
        || !fields.subtasks.is_empty()
}

/// Synchronous validation run before any save call; the first offending
/// field wins, and the title error takes priority.
pub fn validate(fields: &FormFields) -> Result<(), DailyfloClientError> {
    if fields.title.is_empty() {
        return Err(DailyfloClientError::InvalidInputData {
            field: "title".to_string(),
            user_error: "Title is required".to_string(),
        });
    }

    Ok(())
}
