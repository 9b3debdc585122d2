use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_schema_version() -> u8 {
    1
}

/// The task metadata bag as stored by the backend.
///
/// Every member has a serde default so that sparsely filled bags coming from
/// older clients still deserialize into a fully defined value at the store
/// boundary. Member names are camelCase on the wire.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Occurrence dates of a recurring series already marked done.
    #[serde(default)]
    pub recurrence_completions: Vec<NaiveDate>,
    /// Occurrence dates removed from a recurring series because they were
    /// forked into standalone tasks.
    #[serde(default)]
    pub recurrence_exceptions: Vec<NaiveDate>,
}

impl Default for TaskMetadata {
    fn default() -> Self {
        TaskMetadata {
            schema_version: default_schema_version(),
            subtasks: vec![],
            reminders: vec![],
            notes: String::new(),
            tags: vec![],
            recurrence_completions: vec![],
            recurrence_exceptions: vec![],
        }
    }
}

impl TaskMetadata {
    /// Records an occurrence date as forked out of the series, keeping the
    /// list free of duplicates.
    pub fn add_recurrence_exception(&mut self, date: NaiveDate) {
        if !self.recurrence_exceptions.contains(&date) {
            self.recurrence_exceptions.push(date);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(transparent)]
pub struct SubtaskId(pub Uuid);

impl Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubtaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SubtaskId(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(transparent)]
pub struct ReminderId(pub Uuid);

impl Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReminderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ReminderId(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub scheduled_time: DateTime<Utc>,
    pub is_enabled: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Custom,
}
