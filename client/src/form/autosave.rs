use dailyflo::task::{Task, TaskPatch};

use super::{FormFields, ScheduleDraft};

/// Where the schedule fields stand relative to the loaded task record.
///
/// The transition through `Loaded` swallows exactly one draft-change run: the
/// sync triggered by seeding the draft from the server record, which must not
/// be mistaken for a user edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSync {
    Loading,
    Loaded,
    Editing,
}

/// Decides when a draft change warrants an auto-save of the schedule fields.
#[derive(Debug)]
pub struct ScheduleAutosave {
    state: ScheduleSync,
    last_saved_key: Option<String>,
    pending_key: Option<String>,
}

impl Default for ScheduleAutosave {
    fn default() -> Self {
        ScheduleAutosave {
            state: ScheduleSync::Loading,
            last_saved_key: None,
            pending_key: None,
        }
    }
}

impl ScheduleAutosave {
    pub fn new() -> ScheduleAutosave {
        ScheduleAutosave::default()
    }

    /// Must be called every time a task is (re)loaded into the form.
    pub fn task_loaded(&mut self) {
        self.state = ScheduleSync::Loaded;
    }

    pub fn state(&self) -> ScheduleSync {
        self.state
    }

    /// Acknowledges that the last planned save was accepted by the store.
    /// An unacknowledged plan stays retryable.
    pub fn save_succeeded(&mut self) {
        self.last_saved_key = self.pending_key.take();
    }

    /// Returns the patch to issue for the current draft, or `None` when no
    /// save is warranted.
    pub fn plan(
        &mut self,
        draft: &ScheduleDraft,
        fields: &FormFields,
        task: &Task,
    ) -> Option<TaskPatch> {
        match self.state {
            ScheduleSync::Loading => return None,
            ScheduleSync::Loaded => {
                self.state = ScheduleSync::Editing;
                return None;
            }
            ScheduleSync::Editing => (),
        }

        // due dates compared at day granularity
        let due_differs =
            draft.due_date().map(|d| d.date_naive()) != task.due_date.map(|d| d.date_naive());
        let time_differs = draft.time() != task.time;
        let duration_differs = draft.duration().unwrap_or(0) != task.duration;
        let alerts_differ = draft.alerts() != task.reminder_ids();

        if !due_differs && !time_differs && !duration_differs && !alerts_differ {
            return None;
        }

        let key = format!(
            "{:?}|{:?}|{:?}|{:?}",
            draft.due_date(),
            draft.time(),
            draft.duration(),
            draft.alerts()
        );
        if self.last_saved_key.as_deref() == Some(key.as_str()) {
            return None;
        }
        self.pending_key = Some(key);

        let mut patch = TaskPatch {
            due_date: Some(draft.due_date()),
            time: Some(draft.time()),
            duration: Some(draft.duration().unwrap_or(0)),
            ..Default::default()
        };
        if alerts_differ {
            patch.metadata = Some(fields.build_metadata(draft.alerts(), Some(&task.metadata)));
        }

        Some(patch)
    }
}
