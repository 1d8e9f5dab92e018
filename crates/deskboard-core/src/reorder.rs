//! Reorder/Move Engine
//!
//! Resolves a finished drag gesture into a splice within one container or a
//! move between two. Missing containers or ids leave everything untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Board, Entity, TaskStatus};

/// A slot in a container: which list, and the index within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub container_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// A completed gesture. `destination == None` means dropped outside any target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub dragged_id: String,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    DroppedOutside,
    SamePosition,
    UnknownContainer,
    NotInSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Unchanged(Unchanged),
    /// Spliced within one container
    Reordered,
    /// Moved across containers; carries the new membership status
    Moved(TaskStatus),
}

impl MoveOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, MoveOutcome::Unchanged(_))
    }
}

/// Remove `from` and reinsert at `to` in the shortened list (clamped)
pub fn splice<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() {
        return false;
    }
    let item = list.remove(from);
    let to = to.min(list.len());
    list.insert(to, item);
    true
}

/// Apply a drag to the board's columns, stamping the task and the board
pub fn apply_to_board(board: &mut Board, drag: &DragResult, now: DateTime<Utc>) -> MoveOutcome {
    let Some(destination) = drag.destination.as_ref() else {
        return MoveOutcome::Unchanged(Unchanged::DroppedOutside);
    };
    if destination.container_id == drag.source.container_id
        && destination.index == drag.source.index
    {
        return MoveOutcome::Unchanged(Unchanged::SamePosition);
    }

    let Some(src) = board
        .columns
        .iter()
        .position(|c| c.id == drag.source.container_id)
    else {
        return MoveOutcome::Unchanged(Unchanged::UnknownContainer);
    };
    let Some(dst) = board
        .columns
        .iter()
        .position(|c| c.id == destination.container_id)
    else {
        return MoveOutcome::Unchanged(Unchanged::UnknownContainer);
    };
    let Some(from) = board.columns[src].position_of(&drag.dragged_id) else {
        return MoveOutcome::Unchanged(Unchanged::NotInSource);
    };

    let outcome = if src == dst {
        splice(&mut board.columns[src].task_ids, from, destination.index);
        log::debug!(
            "[BOARD] Reordered {} in {} to {}",
            drag.dragged_id,
            destination.container_id,
            destination.index
        );
        MoveOutcome::Reordered
    } else {
        let id = board.columns[src].task_ids.remove(from);
        let target = &mut board.columns[dst].task_ids;
        let index = destination.index.min(target.len());
        target.insert(index, id);

        let status = TaskStatus::from_column_id(&destination.container_id);
        log::debug!(
            "[BOARD] Moved {} from {} to {}[{}]",
            drag.dragged_id,
            drag.source.container_id,
            destination.container_id,
            index
        );
        MoveOutcome::Moved(status)
    };

    board.tasks.update_with(&drag.dragged_id, now, |task| {
        if let MoveOutcome::Moved(status) = outcome {
            task.status = status;
        }
    });
    board.touch(now);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, Task, User};
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn board_with(columns: &[(&str, &[&str])]) -> Board {
        let now = Utc::now();
        let mut board = Board::empty("b", "Test", now);
        board.columns = columns
            .iter()
            .map(|(id, tasks)| {
                let mut c = Column::new(id, id, "#000", None);
                c.task_ids = tasks.iter().map(|t| t.to_string()).collect();
                c
            })
            .collect();
        let tasks = columns.iter().flat_map(|(column, ids)| {
            ids.iter().map(move |id| {
                let mut t = Task::new(*id, User::new("1", "John", "john@example.com"), now);
                t.id = id.to_string();
                t.status = TaskStatus::from_column_id(column);
                t
            })
        });
        board.tasks = Registry::from_items(tasks);
        board
    }

    fn drag(id: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DragResult {
        DragResult {
            dragged_id: id.to_string(),
            source: DragLocation::new(from.0, from.1),
            destination: to.map(|(c, i)| DragLocation::new(c, i)),
        }
    }

    fn ids(board: &Board, column: &str) -> Vec<String> {
        board.column(column).unwrap().task_ids.clone()
    }

    #[test]
    fn test_move_across_columns_sets_status() {
        let mut board = board_with(&[("backlog", &["t1"]), ("todo", &[])]);
        let outcome = apply_to_board(&mut board, &drag("t1", ("backlog", 0), Some(("todo", 0))), Utc::now());

        assert_eq!(outcome, MoveOutcome::Moved(TaskStatus::Todo));
        assert!(ids(&board, "backlog").is_empty());
        assert_eq!(ids(&board, "todo"), vec!["t1".to_string()]);
        assert_eq!(board.tasks.get("t1").unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn test_unknown_column_maps_to_backlog() {
        let mut board = board_with(&[("todo", &["t1"]), ("icebox", &[])]);
        let outcome = apply_to_board(&mut board, &drag("t1", ("todo", 0), Some(("icebox", 0))), Utc::now());
        assert_eq!(outcome, MoveOutcome::Moved(TaskStatus::Backlog));
        assert_eq!(board.tasks.get("t1").unwrap().status, TaskStatus::Backlog);
    }

    #[test]
    fn test_reorder_within_column() {
        let mut board = board_with(&[("todo", &["a", "b", "c"])]);
        let outcome = apply_to_board(&mut board, &drag("a", ("todo", 0), Some(("todo", 2))), Utc::now());
        assert_eq!(outcome, MoveOutcome::Reordered);
        assert_eq!(ids(&board, "todo"), vec!["b", "c", "a"]);
        assert_eq!(board.tasks.get("a").unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn test_index_past_end_is_clamped() {
        let mut board = board_with(&[("todo", &["a"]), ("done", &["x", "y"])]);
        apply_to_board(&mut board, &drag("a", ("todo", 0), Some(("done", 40))), Utc::now());
        assert_eq!(ids(&board, "done"), vec!["x", "y", "a"]);
    }

    #[test]
    fn test_drop_outside_changes_nothing() {
        let mut board = board_with(&[("backlog", &["t1", "t2"]), ("todo", &["t3"])]);
        let before = board.clone();
        let outcome = apply_to_board(&mut board, &drag("t1", ("backlog", 0), None), Utc::now());
        assert_eq!(outcome, MoveOutcome::Unchanged(Unchanged::DroppedOutside));
        assert_eq!(board, before);
    }

    #[test]
    fn test_noop_cases() {
        let mut board = board_with(&[("backlog", &["t1"]), ("todo", &[])]);
        let before = board.clone();
        let now = Utc::now();

        let same = apply_to_board(&mut board, &drag("t1", ("backlog", 0), Some(("backlog", 0))), now);
        assert_eq!(same, MoveOutcome::Unchanged(Unchanged::SamePosition));

        let missing = apply_to_board(&mut board, &drag("t1", ("nope", 0), Some(("todo", 0))), now);
        assert_eq!(missing, MoveOutcome::Unchanged(Unchanged::UnknownContainer));

        let stray = apply_to_board(&mut board, &drag("ghost", ("backlog", 0), Some(("todo", 0))), now);
        assert_eq!(stray, MoveOutcome::Unchanged(Unchanged::NotInSource));

        assert_eq!(board, before);
    }

    #[test]
    fn test_move_stamps_task_and_board() {
        let mut board = board_with(&[("backlog", &["t1"]), ("todo", &[])]);
        let later = Utc::now() + chrono::Duration::minutes(5);
        apply_to_board(&mut board, &drag("t1", ("backlog", 0), Some(("todo", 0))), later);
        assert_eq!(board.tasks.get("t1").unwrap().updated_at, Some(later));
        assert_eq!(board.updated_at, Some(later));
    }

    #[test]
    fn test_splice_bounds() {
        let mut list = vec![1, 2, 3];
        assert!(!splice(&mut list, 5, 0));
        assert!(splice(&mut list, 2, 0));
        assert_eq!(list, vec![3, 1, 2]);
    }

    proptest! {
        #[test]
        fn prop_moves_keep_task_count(
            moves in proptest::collection::vec((0usize..3, 0usize..6, 0usize..3, 0usize..6), 0..40)
        ) {
            let mut board = board_with(&[
                ("backlog", &["a", "b", "c"]),
                ("todo", &["d", "e"]),
                ("done", &["f"]),
            ]);
            let names = ["backlog", "todo", "done"];
            for (src, idx, dst, to) in moves {
                let column = &board.columns[src];
                let Some(id) = column.task_ids.get(idx).cloned() else { continue };
                let d = drag(&id, (names[src], idx), Some((names[dst], to)));
                apply_to_board(&mut board, &d, Utc::now());

                let total: usize = board.columns.iter().map(|c| c.task_ids.len()).sum();
                prop_assert_eq!(total, 6);
                for task in board.tasks.iter() {
                    let holders = board.columns.iter().filter(|c| c.position_of(&task.id).is_some()).count();
                    prop_assert_eq!(holders, 1);
                    prop_assert_eq!(board.column_of(&task.id).unwrap().id.as_str(), task.status.as_str());
                }
            }
        }
    }
}
