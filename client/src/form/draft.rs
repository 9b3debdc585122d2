use chrono::{DateTime, Utc};

use dailyflo::task::{ReminderId, Task, TimeOfDay};

/// In-progress edits to the schedule fields of the task currently open in the
/// form, shared between the main form and the picker subscreens.
///
/// An empty alert list and an unset duration mean "no value set", not an
/// explicit zero; the reconciler falls back to the locally cached field value
/// in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    due_date: Option<DateTime<Utc>>,
    time: Option<TimeOfDay>,
    duration: Option<u32>,
    alerts: Vec<ReminderId>,
}

impl ScheduleDraft {
    pub fn new() -> ScheduleDraft {
        ScheduleDraft::default()
    }

    /// Seeds a draft from a task record, with the due date already resolved
    /// to the occurrence being edited.
    pub fn from_task(task: &Task, due_date: DateTime<Utc>) -> ScheduleDraft {
        ScheduleDraft {
            due_date: Some(due_date),
            time: task.time,
            duration: (task.duration > 0).then_some(task.duration),
            alerts: task.reminder_ids(),
        }
    }

    pub fn set_due_date(&mut self, due_date: DateTime<Utc>) {
        self.due_date = Some(due_date);
    }

    pub fn set_time(&mut self, time: Option<TimeOfDay>) {
        self.time = time;
    }

    pub fn set_duration(&mut self, minutes: Option<u32>) {
        self.duration = minutes;
    }

    pub fn set_alerts(&mut self, alerts: Vec<ReminderId>) {
        self.alerts = alerts;
    }

    /// Bulk-replace, used when the form loads a task or switches from edit to
    /// create mode.
    pub fn replace(&mut self, draft: ScheduleDraft) {
        *self = draft;
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn time(&self) -> Option<TimeOfDay> {
        self.time
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn alerts(&self) -> &[ReminderId] {
        &self.alerts
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}
