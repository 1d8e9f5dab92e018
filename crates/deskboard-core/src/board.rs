//! Backlog Board Applet
//!
//! Commands, filtering and summary numbers for the kanban board.

use chrono::{DateTime, Utc};

use crate::command::Applet;
use crate::config::SuiteConfig;
use crate::domain::{Board, Entity, Priority, Task, TaskPatch, TaskStatus, TaskType};
use crate::error::DomainResult;
use crate::placement::append_to_column;
use crate::reorder::{apply_to_board, DragResult};
use crate::repository::{self, KeyValueStore};

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    /// Append a new task to a column; its status follows the column
    AddTask { column_id: String, task: Task },
    UpdateTask { id: String, patch: TaskPatch },
    DeleteTask(String),
    MoveTask(DragResult),
}

impl Applet for Board {
    type Command = BoardCommand;

    fn load<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> Self {
        repository::load_board(store, config)
    }

    fn save<S: KeyValueStore>(&self, store: &mut S, config: &SuiteConfig) -> DomainResult<()> {
        repository::save_board(store, config, self)
    }

    fn apply(&mut self, command: BoardCommand, now: DateTime<Utc>) -> bool {
        match command {
            BoardCommand::AddTask { column_id, mut task } => {
                let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) else {
                    log::warn!("[BOARD] Cannot add task to unknown column {}", column_id);
                    return false;
                };
                task.status = TaskStatus::from_column_id(&column_id);
                append_to_column(column, &task.id);
                log::debug!("[BOARD] Added {} to {}", task.id, column_id);
                self.tasks.upsert_at(task, now);
            }
            BoardCommand::UpdateTask { id, patch } => {
                if !self.tasks.update_with(&id, now, |task| task.apply_patch(patch)) {
                    return false;
                }
            }
            BoardCommand::DeleteTask(id) => {
                if !self.tasks.remove(&id) {
                    return false;
                }
                for column in &mut self.columns {
                    column.task_ids.retain(|t| t != &id);
                }
                log::debug!("[BOARD] Deleted {}", id);
            }
            BoardCommand::MoveTask(drag) => {
                // moves stamp the board themselves
                return apply_to_board(self, &drag, now).changed();
            }
        }
        self.touch(now);
        true
    }
}

/// Assignee criterion of the filter menu
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssigneeFilter {
    #[default]
    Any,
    Unassigned,
    User(String),
}

/// Search box plus filter menu
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFilter {
    pub query: String,
    pub priority: Option<Priority>,
    pub assignee: AssigneeFilter,
    pub task_type: Option<TaskType>,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.priority.is_some()
            || self.assignee != AssigneeFilter::Any
            || self.task_type.is_some()
    }

    /// Case-insensitive text search over title, description, labels and assignee name
    pub fn matches(&self, task: &Task) -> bool {
        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            let hit = task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
                || task.labels.iter().any(|l| l.to_lowercase().contains(&needle))
                || task
                    .assignee
                    .as_ref()
                    .is_some_and(|a| a.name.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        match &self.assignee {
            AssigneeFilter::Any => {}
            AssigneeFilter::Unassigned => {
                if task.assignee.is_some() {
                    return false;
                }
            }
            AssigneeFilter::User(id) => {
                if task.assignee.as_ref().map(|a| &a.id) != Some(id) {
                    return false;
                }
            }
        }
        if self.task_type.is_some_and(|t| t != task.task_type) {
            return false;
        }
        true
    }

    /// Visible tasks of a column, in column order
    pub fn column_tasks<'a>(&self, board: &'a Board, column_id: &str) -> Vec<&'a Task> {
        board
            .tasks_in(column_id)
            .into_iter()
            .filter(|t| self.matches(t))
            .collect()
    }
}

/// Header numbers of the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Distinct assignee ids, first-seen order
    pub assignees: Vec<String>,
}

impl BoardStats {
    pub fn of(board: &Board) -> Self {
        let mut stats = BoardStats {
            total: board.tasks.len(),
            ..Default::default()
        };
        for task in board.tasks.iter() {
            match task.status {
                TaskStatus::Done => stats.completed += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                _ => {}
            }
            if let Some(assignee) = &task.assignee {
                if !stats.assignees.contains(&assignee.id) {
                    stats.assignees.push(assignee.id.clone());
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_users, User};
    use crate::reorder::DragLocation;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn new_task(title: &str) -> Task {
        Task::new(title, User::new("1", "John Doe", "john@example.com"), Utc::now())
    }

    #[test]
    fn test_add_task_appends_with_column_status() {
        let mut board = Board::sample(Utc::now());
        let task = new_task("Write release notes");
        let id = task.id.clone();
        assert!(board.apply(
            BoardCommand::AddTask {
                column_id: "review".into(),
                task
            },
            Utc::now()
        ));
        let review = board.column("review").unwrap();
        assert_eq!(review.task_ids.last(), Some(&id));
        assert_eq!(board.tasks.get(&id).unwrap().status, TaskStatus::Review);
        assert_eq!(review.task_ids.len(), 2);
        assert!(!review.is_over_limit());

        // soft cap is reported, not enforced
        assert!(board.apply(
            BoardCommand::AddTask {
                column_id: "review".into(),
                task: new_task("One more")
            },
            Utc::now()
        ));
        assert!(board.column("review").unwrap().is_over_limit());
    }

    #[test]
    fn test_add_to_unknown_column_is_noop() {
        let mut board = Board::sample(Utc::now());
        let before = board.clone();
        let changed = board.apply(
            BoardCommand::AddTask {
                column_id: "icebox".into(),
                task: new_task("x"),
            },
            Utc::now(),
        );
        assert!(!changed);
        assert_eq!(board, before);
    }

    #[test]
    fn test_update_merges_and_stamps() {
        let mut board = Board::sample(Utc::now());
        let later = Utc::now() + Duration::minutes(1);
        assert!(board.apply(
            BoardCommand::UpdateTask {
                id: "task-2".into(),
                patch: TaskPatch {
                    priority: Some(Priority::Urgent),
                    ..Default::default()
                }
            },
            later
        ));
        let task = board.tasks.get("task-2").unwrap();
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.title, "Fix login button alignment");
        assert_eq!(task.updated_at, Some(later));
        assert_eq!(board.updated_at, Some(later));

        assert!(!board.apply(
            BoardCommand::UpdateTask {
                id: "nope".into(),
                patch: TaskPatch::default()
            },
            later
        ));
    }

    #[test]
    fn test_delete_removes_from_column() {
        let mut board = Board::sample(Utc::now());
        assert!(board.apply(BoardCommand::DeleteTask("task-1".into()), Utc::now()));
        assert!(board.tasks.get("task-1").is_none());
        assert!(board.column("backlog").unwrap().task_ids.is_empty());
        assert!(!board.apply(BoardCommand::DeleteTask("task-1".into()), Utc::now()));
    }

    #[test]
    fn test_move_command() {
        let mut board = Board::sample(Utc::now());
        let drag = DragResult {
            dragged_id: "task-1".into(),
            source: DragLocation::new("backlog", 0),
            destination: Some(DragLocation::new("todo", 0)),
        };
        assert!(board.apply(BoardCommand::MoveTask(drag.clone()), Utc::now()));
        assert_eq!(board.column("todo").unwrap().task_ids[0], "task-1");

        let outside = DragResult {
            destination: None,
            ..drag
        };
        assert!(!board.apply(BoardCommand::MoveTask(outside), Utc::now()));
    }

    #[test]
    fn test_filters() {
        let board = Board::sample(Utc::now());
        let users = sample_users();

        let search = TaskFilter {
            query: "AUTH".into(),
            ..Default::default()
        };
        assert_eq!(search.column_tasks(&board, "backlog").len(), 1);
        assert_eq!(search.column_tasks(&board, "review").len(), 1);
        assert!(search.column_tasks(&board, "todo").is_empty());

        let mut board = board;
        board.tasks.get_mut("task-3").unwrap().assignee = None;
        let unassigned = TaskFilter {
            assignee: AssigneeFilter::Unassigned,
            ..Default::default()
        };
        let hits: Vec<_> = board.tasks.iter().filter(|t| unassigned.matches(t)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "task-3");

        let by_user = TaskFilter {
            assignee: AssigneeFilter::User(users[1].id.clone()),
            task_type: Some(TaskType::Epic),
            ..Default::default()
        };
        let hits: Vec<_> = board.tasks.iter().filter(|t| by_user.matches(t)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "task-5");
        assert!(by_user.is_active());
        assert!(!TaskFilter::default().is_active());
    }

    #[test]
    fn test_stats() {
        let board = Board::sample(Utc::now());
        let stats = BoardStats::of(&board);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.assignees, vec!["2", "3", "1", "4"]);
    }
}
