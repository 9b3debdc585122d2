use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::TaskColor;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(transparent)]
pub struct TaskListId(pub Uuid);

impl Display for TaskListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskListId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TaskListId(Uuid::parse_str(s)?))
    }
}

/// A user-defined list grouping tasks into a category.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TaskList {
    pub id: TaskListId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: TaskColor,
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether this is the default inbox list.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /lists/`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TaskListCreation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: TaskColor,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Partial update payload for `PATCH /lists/{id}/`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct TaskListPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TaskColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}
