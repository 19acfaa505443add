//! Error types for the store, the session layer and the durable mirror.
//!
//! Every mutation returns `Result<_, StoreError>`. A returned error means the
//! entity tables were left exactly as they were before the call.

use thiserror::Error;

use crate::messages::EntityKind;

/// Errors surfaced by [`KanbanStore`](crate::KanbanStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("Task {task} is not in column {column}")]
    TaskNotInColumn { task: String, column: String },

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Persisted state is inconsistent: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("Store lock poisoned by a panicking writer")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Errors from the local sign-in stand-in.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A user with email {0} already exists")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from a [`KeyValueStorage`](crate::storage::KeyValueStorage) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in slot {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend lock poisoned")]
    LockPoisoned,
}

/// Unrecognized token for one of the toolbar enums.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// A broken referential or ordering invariant, reported by
/// [`Tables::verify`](crate::tables::Tables::verify).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Column {column} references missing board {board}")]
    DanglingBoard { column: String, board: String },

    #[error("Task {task} references missing column {column}")]
    DanglingColumn { task: String, column: String },

    #[error("Board {board} lists column {column} which it does not own")]
    ForeignColumn { board: String, column: String },

    #[error("Column {column} lists task {task} which it does not own")]
    ForeignTask { column: String, task: String },

    #[error("Column {column} is owned by board {board} but missing from its column list")]
    UnlistedColumn { board: String, column: String },

    #[error("Task {task} is owned by column {column} but missing from its task list")]
    UnlistedTask { column: String, task: String },

    #[error("{kind} {id} appears more than once in its parent's list")]
    Duplicate { kind: EntityKind, id: String },

    #[error("{kind} {id} has order {order} but sits at position {position}")]
    OrderMismatch {
        kind: EntityKind,
        id: String,
        order: usize,
        position: usize,
    },
}
