use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use serde_with::{serde_as, DisplayFromStr};
use uuid::Uuid;

use crate::list::TaskListId;

pub use self::metadata::{Reminder, ReminderId, ReminderKind, Subtask, SubtaskId, TaskMetadata};

pub mod metadata;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TaskId(Uuid::parse_str(s)?))
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub time: Option<TimeOfDay>,
    #[serde(default)]
    pub duration: u32,
    pub priority_level: TaskPriority,
    pub color: TaskColor,
    #[serde(default)]
    pub icon: Option<String>,
    pub routine_type: RoutineType,
    pub list: Option<TaskListId>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub metadata: TaskMetadata,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        self.routine_type != RoutineType::Once
    }

    /// An occurrence is exceptional when it has been forked into a standalone
    /// task and removed from the recurring series.
    pub fn occurrence_is_exception(&self, date: NaiveDate) -> bool {
        self.metadata.recurrence_exceptions.contains(&date)
    }

    pub fn reminder_ids(&self) -> Vec<ReminderId> {
        self.metadata
            .reminders
            .iter()
            .map(|reminder| reminder.id)
            .collect()
    }
}

/// Wall-clock time of day (`HH:MM`) attached to a task independently of its
/// due date.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<TimeOfDay> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn apply_to(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M").map(TimeOfDay)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

macro_attr! {
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, EnumFromStr!, EnumDisplay!)]
    #[serde(rename_all = "lowercase")]
    pub enum RoutineType {
        Once,
        Daily,
        Weekly,
        Monthly,
        Yearly
    }
}

macro_attr! {
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, EnumFromStr!, EnumDisplay!)]
    #[serde(rename_all = "lowercase")]
    pub enum TaskColor {
        Red,
        Blue,
        Green,
        Yellow,
        Purple,
        Teal,
        Orange
    }
}

#[derive(Serialize_repr, Deserialize_repr, PartialEq, Eq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum TaskPriority {
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
    P5 = 5,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::P3
    }
}

/// Payload for `POST /tasks/`.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TaskCreation {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub time: Option<TimeOfDay>,
    pub duration: u32,
    pub priority_level: TaskPriority,
    pub color: TaskColor,
    #[serde(default)]
    pub icon: Option<String>,
    pub routine_type: RoutineType,
    pub list: Option<TaskListId>,
    #[serde(default)]
    pub sort_order: i32,
    pub metadata: TaskMetadata,
}

/// Partial update payload for `PATCH /tasks/{id}/`.
///
/// Nullable fields are double-optional: an omitted field leaves the stored
/// value untouched while an explicit `null` clears it server-side. `duration`
/// has no null representation on the wire and uses `0` as "cleared".
#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde_as(as = "Option<Option<DisplayFromStr>>")]
    pub time: Option<Option<TimeOfDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_level: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TaskColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_type: Option<RoutineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Option<TaskListId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TaskMetadata>,
}

/// Payload for `PATCH /tasks/{id}/complete/`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TaskCompletion {
    pub is_completed: bool,
}
