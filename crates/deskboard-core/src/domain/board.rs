//! Board and Column Entities

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::entity::impl_entity;
use crate::registry::Registry;
use super::task::{Priority, Task, TaskStatus, TaskType, User};

/// A board column: ordered task ids plus an optional soft cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Column {
    pub fn new(id: &str, title: &str, color: &str, limit: Option<usize>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            task_ids: Vec::new(),
            color: color.to_string(),
            limit,
        }
    }

    /// Display-only: more tasks than the soft cap
    pub fn is_over_limit(&self) -> bool {
        matches!(self.limit, Some(limit) if self.task_ids.len() > limit)
    }

    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// Kanban board: columns own the ordering, `tasks` owns the records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Registry<Task>,
    #[serde(default, with = "crate::repository::dates")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Board);

/// The five default columns, empty
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("backlog", "Backlog", "#757575", None),
        Column::new("todo", "To Do", "#2196f3", Some(5)),
        Column::new("in-progress", "In Progress", "#ff9800", Some(3)),
        Column::new("review", "Review", "#9c27b0", Some(2)),
        Column::new("done", "Done", "#4caf50", None),
    ]
}

/// People shown in the assignee picker
pub fn sample_users() -> Vec<User> {
    let mut users = vec![
        User::new("1", "John Doe", "john@example.com"),
        User::new("2", "Jane Smith", "jane@example.com"),
        User::new("3", "Bob Johnson", "bob@example.com"),
        User::new("4", "Alice Brown", "alice@example.com"),
    ];
    for (i, user) in users.iter_mut().enumerate() {
        user.avatar = Some(format!("https://i.pravatar.cc/150?img={}", i + 1));
    }
    users
}

fn day(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()
}

impl Board {
    /// An empty board with the default columns
    pub fn empty(id: &str, name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            columns: default_columns(),
            tasks: Registry::new(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Board used when nothing usable is in storage: one sample task per column
    pub fn sample(now: DateTime<Utc>) -> Self {
        let users = sample_users();
        let reporter = users[0].clone();
        let mut board = Self::empty("board-1", "Project Kanban Board", now);
        board.description = Some("Main project management board".to_string());

        let samples = [
            ("task-1", "Design user authentication flow", "Create wireframes and mockups for the login and registration process",
                Priority::High, TaskStatus::Backlog, 1, &["design", "auth"][..], 5, TaskType::Story, day(2024, 1, 1), day(2024, 1, 1)),
            ("task-2", "Fix login button alignment", "The login button is not properly aligned on mobile devices",
                Priority::Medium, TaskStatus::Todo, 2, &["bug", "mobile"][..], 2, TaskType::Bug, day(2024, 1, 2), day(2024, 1, 2)),
            ("task-3", "Implement API endpoints", "Create REST API endpoints for user management",
                Priority::High, TaskStatus::InProgress, 0, &["backend", "api"][..], 8, TaskType::Story, day(2024, 1, 3), day(2024, 1, 10)),
            ("task-4", "Code review for authentication", "Review the authentication implementation",
                Priority::Medium, TaskStatus::Review, 3, &["review", "auth"][..], 3, TaskType::Task, day(2024, 1, 5), day(2024, 1, 12)),
            ("task-5", "Setup CI/CD pipeline", "Configure automated testing and deployment",
                Priority::Low, TaskStatus::Done, 1, &["devops", "ci-cd"][..], 13, TaskType::Epic, day(2023, 12, 20), day(2024, 1, 8)),
        ];

        let mut tasks = Vec::new();
        for (id, title, description, priority, status, assignee, labels, points, task_type, created, updated) in samples {
            let mut task = Task::new(title, reporter.clone(), now);
            task.id = id.to_string();
            task.description = description.to_string();
            task.priority = priority;
            task.status = status;
            task.assignee = users.get(assignee).cloned();
            task.labels = labels.iter().map(|l| l.to_string()).collect();
            task.story_points = Some(points);
            task.task_type = task_type;
            task.created_at = created;
            task.updated_at = updated;
            if id == "task-3" {
                task.due_date = day(2024, 2, 15);
            }

            if let Some(column) = board.columns.iter_mut().find(|c| c.id == status.as_str()) {
                column.task_ids.push(task.id.clone());
            }
            tasks.push(task);
        }
        board.tasks = Registry::from_items(tasks);
        board
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Column currently holding a task
    pub fn column_of(&self, task_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.position_of(task_id).is_some())
    }

    /// Tasks of a column in display order; stale ids are skipped
    pub fn tasks_in(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|c| c.task_ids.iter().filter_map(|id| self.tasks.get(id)).collect())
            .unwrap_or_default()
    }
}
