use chrono::{DateTime, Utc};

use dailyflo::{
    list::TaskListId,
    task::{
        Reminder, ReminderId, ReminderKind, RoutineType, Subtask, Task, TaskColor, TaskMetadata,
        TaskPriority, TimeOfDay,
    },
};

/// The locally cached form field state, seeded once when the form opens and
/// mutated by direct edits. Schedule fields are shadowed by the
/// [`ScheduleDraft`](super::ScheduleDraft) whenever the draft holds a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub color: TaskColor,
    pub icon: Option<String>,
    pub priority: TaskPriority,
    pub list: Option<TaskListId>,
    pub routine_type: RoutineType,
    pub subtasks: Vec<Subtask>,
    pub reminders: Vec<Reminder>,
    pub notes: String,
    pub due_date: Option<DateTime<Utc>>,
    pub time: Option<TimeOfDay>,
    pub duration: Option<u32>,
    pub alerts: Vec<ReminderId>,
}

impl FormFields {
    pub fn from_defaults(defaults: &FormDefaults) -> FormFields {
        FormFields {
            title: String::new(),
            description: String::new(),
            color: defaults.color,
            icon: defaults.icon.clone(),
            priority: defaults.priority,
            list: defaults.list,
            routine_type: defaults.routine_type,
            subtasks: vec![],
            reminders: vec![],
            notes: String::new(),
            due_date: None,
            time: None,
            duration: None,
            alerts: vec![],
        }
    }

    /// Seeds the field state from a task record, with the due date already
    /// resolved to the occurrence being edited.
    pub fn from_task(task: &Task, due_date: DateTime<Utc>) -> FormFields {
        FormFields {
            title: task.title.clone(),
            description: task.description.clone(),
            color: task.color,
            icon: task.icon.clone(),
            priority: task.priority_level,
            list: task.list,
            routine_type: task.routine_type,
            subtasks: task.metadata.subtasks.clone(),
            reminders: task.metadata.reminders.clone(),
            notes: task.metadata.notes.clone(),
            due_date: Some(due_date),
            time: task.time,
            duration: (task.duration > 0).then_some(task.duration),
            alerts: task.reminder_ids(),
        }
    }

    /// Builds the metadata bag persisted on save. The reminder list follows
    /// the effective alert ids; reminder records are looked up in the field
    /// state first, then in the existing metadata. Recurrence bookkeeping is
    /// carried over from the existing metadata when editing; a standalone
    /// task starts with none.
    pub fn build_metadata(
        &self,
        alerts: &[ReminderId],
        existing: Option<&TaskMetadata>,
    ) -> TaskMetadata {
        TaskMetadata {
            subtasks: self.subtasks.clone(),
            reminders: alerts
                .iter()
                .filter_map(|alert_id| {
                    self.reminders
                        .iter()
                        .find(|reminder| reminder.id == *alert_id)
                        .or_else(|| {
                            existing.and_then(|metadata| {
                                metadata
                                    .reminders
                                    .iter()
                                    .find(|reminder| reminder.id == *alert_id)
                            })
                        })
                })
                .map(|reminder| Reminder {
                    id: reminder.id,
                    kind: ReminderKind::Custom,
                    scheduled_time: reminder.scheduled_time,
                    is_enabled: true,
                })
                .collect(),
            notes: self.notes.clone(),
            tags: vec![],
            recurrence_completions: existing
                .map(|metadata| metadata.recurrence_completions.clone())
                .unwrap_or_default(),
            recurrence_exceptions: existing
                .map(|metadata| metadata.recurrence_exceptions.clone())
                .unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// Theme-derived defaults for a freshly created task; the create-mode dirty
/// check compares against these.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefaults {
    pub color: TaskColor,
    pub icon: Option<String>,
    pub priority: TaskPriority,
    pub list: Option<TaskListId>,
    pub routine_type: RoutineType,
}

impl Default for FormDefaults {
    fn default() -> Self {
        FormDefaults {
            color: TaskColor::Blue,
            icon: None,
            priority: TaskPriority::P3,
            list: None,
            routine_type: RoutineType::Once,
        }
    }
}
