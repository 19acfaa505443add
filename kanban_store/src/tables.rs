//! The three normalized entity tables.
//!
//! [`Tables`] is the read model handed to the rendering layer. Readers get
//! shared references only; every write goes through
//! [`KanbanStore`](crate::KanbanStore), which keeps the cross-table
//! invariants:
//!
//! - every task's `column_id` and every column's `board_id` resolve
//! - a column's `task_ids` lists exactly the tasks that point at it, once each
//! - a board's `column_ids` lists exactly the columns that point at it, once each
//! - each `order` field equals the entity's position in its parent's list

use std::collections::{HashMap, HashSet};

use crate::error::IntegrityError;
use crate::messages::EntityKind;
use crate::model::{Board, BoardId, Column, ColumnId, Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub(crate) boards: HashMap<BoardId, Board>,
    pub(crate) columns: HashMap<ColumnId, Column>,
    pub(crate) tasks: HashMap<TaskId, Task>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boards(&self) -> &HashMap<BoardId, Board> {
        &self.boards
    }

    pub fn columns(&self) -> &HashMap<ColumnId, Column> {
        &self.columns
    }

    pub fn tasks(&self) -> &HashMap<TaskId, Task> {
        &self.tasks
    }

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.get(id)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Resolve the board that currently owns a task, through its column.
    pub fn board_of_task(&self, id: &TaskId) -> Option<&Board> {
        let task = self.tasks.get(id)?;
        let column = self.columns.get(&task.column_id)?;
        self.boards.get(&column.board_id)
    }

    /// Columns of a board in display order. Unknown boards yield nothing.
    pub fn board_columns(&self, id: &BoardId) -> Vec<&Column> {
        self.boards
            .get(id)
            .map(|board| {
                board
                    .column_ids
                    .iter()
                    .filter_map(|cid| self.columns.get(cid))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tasks of a column in rank order. Unknown columns yield nothing.
    pub fn column_tasks(&self, id: &ColumnId) -> Vec<&Task> {
        self.columns
            .get(id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|tid| self.tasks.get(tid))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty() && self.columns.is_empty() && self.tasks.is_empty()
    }

    /// Check every cross-table invariant.
    ///
    /// Returns the first violation found. The store never produces a violating
    /// state itself; this guards states restored from disk.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        for column in self.columns.values() {
            if !self.boards.contains_key(&column.board_id) {
                return Err(IntegrityError::DanglingBoard {
                    column: column.id.to_string(),
                    board: column.board_id.to_string(),
                });
            }
        }
        for task in self.tasks.values() {
            if !self.columns.contains_key(&task.column_id) {
                return Err(IntegrityError::DanglingColumn {
                    task: task.id.to_string(),
                    column: task.column_id.to_string(),
                });
            }
        }

        for board in self.boards.values() {
            let mut seen = HashSet::new();
            for (position, cid) in board.column_ids.iter().enumerate() {
                if !seen.insert(*cid) {
                    return Err(IntegrityError::Duplicate {
                        kind: EntityKind::Column,
                        id: cid.to_string(),
                    });
                }
                let column = self
                    .columns
                    .get(cid)
                    .filter(|c| c.board_id == board.id)
                    .ok_or_else(|| IntegrityError::ForeignColumn {
                        board: board.id.to_string(),
                        column: cid.to_string(),
                    })?;
                if column.order != position {
                    return Err(IntegrityError::OrderMismatch {
                        kind: EntityKind::Column,
                        id: cid.to_string(),
                        order: column.order,
                        position,
                    });
                }
            }
        }

        for column in self.columns.values() {
            let mut seen = HashSet::new();
            for (position, tid) in column.task_ids.iter().enumerate() {
                if !seen.insert(*tid) {
                    return Err(IntegrityError::Duplicate {
                        kind: EntityKind::Task,
                        id: tid.to_string(),
                    });
                }
                let task = self
                    .tasks
                    .get(tid)
                    .filter(|t| t.column_id == column.id)
                    .ok_or_else(|| IntegrityError::ForeignTask {
                        column: column.id.to_string(),
                        task: tid.to_string(),
                    })?;
                if task.order != position {
                    return Err(IntegrityError::OrderMismatch {
                        kind: EntityKind::Task,
                        id: tid.to_string(),
                        order: task.order,
                        position,
                    });
                }
            }
        }

        // Listed entries are all owned at this point, so a count mismatch
        // means some owned child is missing from its parent's list.
        for column in self.columns.values() {
            let board = &self.boards[&column.board_id];
            if !board.column_ids.contains(&column.id) {
                return Err(IntegrityError::UnlistedColumn {
                    board: board.id.to_string(),
                    column: column.id.to_string(),
                });
            }
        }
        for task in self.tasks.values() {
            let column = &self.columns[&task.column_id];
            if !column.task_ids.contains(&task.id) {
                return Err(IntegrityError::UnlistedTask {
                    column: column.id.to_string(),
                    task: task.id.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Rewrite `order` of every task in a column to its list position.
    pub(crate) fn renumber_tasks(&mut self, column_id: &ColumnId) {
        let Some(column) = self.columns.get(column_id) else {
            return;
        };
        for (position, tid) in column.task_ids.iter().enumerate() {
            if let Some(task) = self.tasks.get_mut(tid) {
                task.order = position;
            }
        }
    }

    /// Rewrite `order` of every column in a board to its list position.
    pub(crate) fn renumber_columns(&mut self, board_id: &BoardId) {
        let Some(board) = self.boards.get(board_id) else {
            return;
        };
        for (position, cid) in board.column_ids.iter().enumerate() {
            if let Some(column) = self.columns.get_mut(cid) {
                column.order = position;
            }
        }
    }

    /// Remove a column and all of its tasks. Does not touch the parent board.
    /// Returns the number of tasks removed.
    pub(crate) fn drop_column(&mut self, column_id: &ColumnId) -> usize {
        let Some(column) = self.columns.remove(column_id) else {
            return 0;
        };
        let mut removed = 0;
        for tid in &column.task_ids {
            if self.tasks.remove(tid).is_some() {
                removed += 1;
            }
        }
        removed
    }
}
