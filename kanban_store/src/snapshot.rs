//! Serializable point-in-time copy of the entity tables.
//!
//! A [`Snapshot`] is what the state mirror writes to the `kanban_state` slot and
//! what [`KanbanStore::snapshot`](crate::KanbanStore::snapshot) hands out to
//! callers that want an owned, immutable view.

use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;
use crate::model::{Board, Column, Task};
use crate::tables::Tables;

/// Snapshot format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Rows of each table, sorted by id so equal states encode identically.
    pub boards: Vec<Board>,
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn from_tables(tables: &Tables) -> Self {
        let mut boards: Vec<Board> = tables.boards.values().cloned().collect();
        let mut columns: Vec<Column> = tables.columns.values().cloned().collect();
        let mut tasks: Vec<Task> = tables.tasks.values().cloned().collect();
        boards.sort_by_key(|b| b.id);
        columns.sort_by_key(|c| c.id);
        tasks.sort_by_key(|t| t.id);
        Self {
            version: SNAPSHOT_VERSION,
            boards,
            columns,
            tasks,
        }
    }

    /// Rebuild tables from the snapshot, rejecting any state that breaks a
    /// cross-table invariant.
    pub fn into_tables(self) -> Result<Tables, IntegrityError> {
        let tables = Tables {
            boards: self.boards.into_iter().map(|b| (b.id, b)).collect(),
            columns: self.columns.into_iter().map(|c| (c.id, c)).collect(),
            tasks: self.tasks.into_iter().map(|t| (t.id, t)).collect(),
        };
        tables.verify()?;
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{BoardId, ColumnId};

    #[test]
    fn test_empty_snapshot_restores_empty_tables() {
        let snapshot = Snapshot::from_tables(&Tables::new());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!(snapshot.into_tables().unwrap().is_empty());
    }

    #[test]
    fn test_restore_rejects_orphan_column() {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            boards: Vec::new(),
            columns: vec![Column {
                id: ColumnId::new(),
                title: "Lost".into(),
                board_id: BoardId::new(),
                order: 0,
                task_ids: Vec::new(),
            }],
            tasks: Vec::new(),
        };
        assert!(matches!(
            snapshot.into_tables(),
            Err(IntegrityError::DanglingBoard { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_board_listing_missing_column() {
        let board = Board {
            id: BoardId::new(),
            title: "B".into(),
            description: String::new(),
            created_by: "ada".into(),
            created_at: Utc::now(),
            column_ids: vec![ColumnId::new()],
        };
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            boards: vec![board],
            columns: Vec::new(),
            tasks: Vec::new(),
        };
        assert!(matches!(
            snapshot.into_tables(),
            Err(IntegrityError::ForeignColumn { .. })
        ));
    }
}
