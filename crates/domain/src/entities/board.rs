//! Task board kept in `board.json`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::is_false;
use crate::entities::CharacterBased;
use crate::ids::{CharacterId, TaskId, TaskStatusId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub text: String,
    pub id: TaskStatusId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color_hexa: String,
    /// Tasks in a resolving status count as done
    #[serde(default, skip_serializing_if = "is_false")]
    pub resolves: bool,
}

impl TaskStatus {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: TaskStatusId::new(),
            color_hexa: String::new(),
            resolves: false,
        }
    }

    fn builtin(text: &str, id: u128, color_hexa: &str, resolves: bool) -> Self {
        Self {
            text: text.to_string(),
            id: TaskStatusId::from_u128(id),
            color_hexa: color_hexa.to_string(),
            resolves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub id: TaskId,
    pub status_ref: TaskStatusId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, status: &TaskStatus) -> Self {
        Self {
            title: title.into(),
            id: TaskId::new(),
            status_ref: status.id,
            creation_date: None,
            summary: String::new(),
            character_id: None,
            tags: Vec::new(),
        }
    }
}

impl CharacterBased for Task {
    fn character_id(&self) -> Option<CharacterId> {
        self.character_id
    }
}

pub fn default_task_statuses() -> Vec<TaskStatus> {
    vec![
        TaskStatus::builtin("To Do", 0xa8c55ed7_a2cb_4f2f_a4bb_6a7d3e9b6a11, "#0077b6", false),
        TaskStatus::builtin("In Progress", 0x3bcd5c3d_3b8e_4e0a_9f4b_4c1e7ad4f522, "#f77f00", false),
        TaskStatus::builtin("Done", 0x27e3a9b1_9b62_46c9_8e91_0a6b9f1d3c33, "#588157", true),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default = "default_task_statuses")]
    pub statuses: Vec<TaskStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn status(&self, id: TaskStatusId) -> Option<&TaskStatus> {
        self.statuses.iter().find(|s| s.id == id)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            statuses: default_task_statuses(),
            tasks: Vec::new(),
        }
    }
}
