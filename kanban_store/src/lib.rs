//! # kanban_store
//!
//! Normalized client-side state for a Kanban board application.
//!
//! Boards own ordered columns, columns own ordered tasks, and tasks can be
//! moved between columns (or within one) at a chosen position. The UI layer
//! dispatches typed [`Action`]s into a [`KanbanStore`], subscribes to
//! [`ChangeNotification`]s, and re-derives what it renders with the functions in
//! [`view`].
//!
//! ## Quick start
//!
//! ```ignore
//! use kanban_store::{Action, KanbanStoreBuilder, Outcome};
//! use kanban_store::storage::FileStorage;
//!
//! let mut store = KanbanStoreBuilder::new()
//!     .with_storage(FileStorage::open("./kanban-data")?)
//!     .build()?;
//!
//! store.login("ada@example.com", "secret")?;
//! let board = store.create_board("Launch", "Q3 launch plan");
//! let todo = store.create_column(&board, "To Do")?;
//! let done = store.create_column(&board, "Done")?;
//! // ... create tasks, then on drop:
//! store.dispatch(Action::MoveTask { task_id, from_column_id: todo, to_column_id: done, new_index: 0 })?;
//! ```
//!
//! ## Key types
//!
//! - [`KanbanStore`] — entity tables, session and the mutation protocol
//! - [`KanbanStoreBuilder`] — storage backend and mirror configuration
//! - [`SharedStore`] — whole-store lock for multi-threaded hosts
//! - [`Tables`] — read model handed to the rendering layer
//! - [`Action`] / [`Outcome`] — typed mutation requests and their results
//! - [`ChangeNotification`] — event emitted after every successful mutation

pub mod error;
pub mod messages;
pub mod model;
pub mod session;
pub mod shared;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod tables;
pub mod view;

pub use error::{AuthError, IntegrityError, ParseError, StorageError, StoreError};
pub use messages::{Action, ChangeNotification, EntityKind, Outcome, WriteKind};
pub use model::{Board, BoardId, Column, ColumnId, Priority, Task, TaskFields, TaskId, User, UserId};
pub use shared::SharedStore;
pub use snapshot::Snapshot;
pub use store::{KanbanStore, KanbanStoreBuilder};
pub use tables::Tables;
