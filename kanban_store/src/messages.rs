//! Typed mutation requests and the notifications emitted after they apply.
//!
//! The UI layer talks to the store through [`Action`]s, either by calling
//! [`KanbanStore::dispatch`](crate::KanbanStore::dispatch) with a value built in
//! Rust or by deserializing one from JSON:
//!
//! ```json
//! {"type": "moveTask", "taskId": "…", "fromColumnId": "…", "toColumnId": "…", "newIndex": 0}
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{BoardId, ColumnId, Priority, TaskFields, TaskId};

/// Which entity table a notification or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Board,
    Column,
    Task,
    Session,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Board => "Board",
            EntityKind::Column => "Column",
            EntityKind::Task => "Task",
            EntityKind::Session => "Session",
        };
        f.write_str(name)
    }
}

/// The kind of write that produced a [`ChangeNotification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteKind {
    Insert,
    Update,
    Delete,
    Move,
}

/// Lightweight event broadcast after every successful mutation.
///
/// Subscribers (typically the rendering layer) re-derive their views from the
/// store when one arrives; the notification itself carries no entity data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub entity: EntityKind,
    pub kind: WriteKind,
    /// Id of the entity the action targeted. Cascaded deletes are not
    /// announced individually.
    pub id: String,
}

/// One variant per store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    SetCurrentUser {
        name: String,
    },
    CreateBoard {
        title: String,
        description: String,
    },
    DeleteBoard {
        board_id: BoardId,
    },
    CreateColumn {
        board_id: BoardId,
        title: String,
    },
    UpdateColumn {
        column_id: ColumnId,
        title: String,
    },
    DeleteColumn {
        column_id: ColumnId,
    },
    CreateTask {
        column_id: ColumnId,
        title: String,
        description: String,
        assigned_to: String,
        priority: Priority,
        due_date: NaiveDate,
    },
    UpdateTask {
        task_id: TaskId,
        title: String,
        description: String,
        assigned_to: String,
        priority: Priority,
        due_date: NaiveDate,
    },
    DeleteTask {
        task_id: TaskId,
    },
    MoveTask {
        task_id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        new_index: usize,
    },
}

impl Action {
    /// Build a `CreateTask` action from a shared field payload.
    pub fn create_task(column_id: ColumnId, fields: TaskFields) -> Self {
        Action::CreateTask {
            column_id,
            title: fields.title,
            description: fields.description,
            assigned_to: fields.assigned_to,
            priority: fields.priority,
            due_date: fields.due_date,
        }
    }

    /// Build an `UpdateTask` action from a shared field payload.
    pub fn update_task(task_id: TaskId, fields: TaskFields) -> Self {
        Action::UpdateTask {
            task_id,
            title: fields.title,
            description: fields.description,
            assigned_to: fields.assigned_to,
            priority: fields.priority,
            due_date: fields.due_date,
        }
    }

    /// Short camelCase name of the action, as used in the JSON `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCurrentUser { .. } => "setCurrentUser",
            Action::CreateBoard { .. } => "createBoard",
            Action::DeleteBoard { .. } => "deleteBoard",
            Action::CreateColumn { .. } => "createColumn",
            Action::UpdateColumn { .. } => "updateColumn",
            Action::DeleteColumn { .. } => "deleteColumn",
            Action::CreateTask { .. } => "createTask",
            Action::UpdateTask { .. } => "updateTask",
            Action::DeleteTask { .. } => "deleteTask",
            Action::MoveTask { .. } => "moveTask",
        }
    }
}

/// Result of a successfully dispatched [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "camelCase")]
pub enum Outcome {
    BoardCreated(BoardId),
    ColumnCreated(ColumnId),
    TaskCreated(TaskId),
    Applied,
}
