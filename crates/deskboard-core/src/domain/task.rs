//! Task Entity
//!
//! A backlog board card. Lives in exactly one column; `status` mirrors that
//! column through a fixed lookup table (see [`TaskStatus::from_column_id`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::impl_entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Board status, one per default column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    /// Status implied by a column id; unknown columns fall back to backlog
    pub fn from_column_id(column_id: &str) -> Self {
        match column_id {
            "backlog" => TaskStatus::Backlog,
            "todo" => TaskStatus::Todo,
            "in-progress" => TaskStatus::InProgress,
            "review" => TaskStatus::Review,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Backlog,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Story,
    Bug,
    Task,
    Epic,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [TaskType::Story, TaskType::Bug, TaskType::Task, TaskType::Epic];

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Story => "story",
            TaskType::Bug => "bug",
            TaskType::Task => "task",
            TaskType::Epic => "epic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author: User,
    #[serde(default, with = "crate::repository::dates")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub uploaded_by: User,
    #[serde(default, with = "crate::repository::dates")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(default, with = "crate::repository::dates")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A board card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    pub reporter: User,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(default, with = "crate::repository::dates")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
}

impl Task {
    /// Create a task with a fresh `task-<uuid>` id, stamped `now`
    pub fn new(title: impl Into<String>, reporter: User, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("task-{}", uuid::Uuid::new_v4()),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            assignee: None,
            reporter,
            labels: Vec::new(),
            story_points: None,
            due_date: None,
            created_at: Some(now),
            updated_at: Some(now),
            comments: Vec::new(),
            attachments: Vec::new(),
            subtasks: Vec::new(),
            epic: None,
            sprint: None,
            task_type: TaskType::default(),
        }
    }

    /// Apply every field present in `patch`
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(labels) = patch.labels {
            self.labels = labels;
        }
        if let Some(points) = patch.story_points {
            self.story_points = points;
        }
        if let Some(due) = patch.due_date {
            self.due_date = due;
        }
        if let Some(task_type) = patch.task_type {
            self.task_type = task_type;
        }
        if let Some(epic) = patch.epic {
            self.epic = epic;
        }
        if let Some(sprint) = patch.sprint {
            self.sprint = sprint;
        }
    }
}

impl_entity!(Task);

/// Fields edited through the task dialog. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<User>>,
    pub labels: Option<Vec<String>>,
    pub story_points: Option<Option<u32>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub task_type: Option<TaskType>,
    pub epic: Option<Option<String>>,
    pub sprint: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;

    fn reporter() -> User {
        User::new("1", "John Doe", "john@example.com")
    }

    #[test]
    fn test_task_creation() {
        let now = Utc::now();
        let task = Task::new("Write docs", reporter(), now);
        assert!(task.id().starts_with("task-"));
        assert_eq!(task.status, TaskStatus::Backlog);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, Some(now));
    }

    #[test]
    fn test_status_lookup() {
        assert_eq!(TaskStatus::from_column_id("in-progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_column_id("done"), TaskStatus::Done);
        assert_eq!(TaskStatus::from_column_id("icebox"), TaskStatus::Backlog);
    }

    #[test]
    fn test_wire_names() {
        let mut task = Task::new("t", reporter(), Utc::now());
        task.status = TaskStatus::InProgress;
        task.task_type = TaskType::Bug;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["type"], "bug");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("storyPoints").is_none());
    }

    #[test]
    fn test_select_values_parse() {
        for priority in Priority::ALL {
            assert_eq!(Priority::from_str(priority.as_str()), Some(priority));
        }
        assert_eq!(TaskType::from_str("epic"), Some(TaskType::Epic));
        assert_eq!(TaskType::from_str("chore"), None);
    }

    #[test]
    fn test_patch_merges() {
        let mut task = Task::new("old", reporter(), Utc::now());
        task.labels = vec!["keep".into()];
        task.apply_patch(TaskPatch {
            title: Some("new".into()),
            story_points: Some(Some(3)),
            ..Default::default()
        });
        assert_eq!(task.title, "new");
        assert_eq!(task.story_points, Some(3));
        assert_eq!(task.labels, vec!["keep".to_string()]);
    }

    #[test]
    fn test_touch_keeps_order() {
        let later = Utc::now();
        let earlier = later - chrono::Duration::hours(1);
        let mut task = Task::new("t", reporter(), later);
        task.touch(earlier);
        assert_eq!(task.updated_at, Some(later));
    }
}
