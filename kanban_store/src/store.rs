//! The store: entity tables, session state and the mutation protocol.
//!
//! Every mutation runs in two phases. It first resolves every id it needs and
//! returns [`StoreError::NotFound`] if any is missing; only then does it edit
//! the tables. Readers holding `&KanbanStore` therefore never see a partially
//! applied mutation, and a failed call leaves the tables untouched.

use chrono::Utc;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::messages::{Action, ChangeNotification, EntityKind, Outcome, WriteKind};
use crate::model::{Board, BoardId, Column, ColumnId, Task, TaskFields, TaskId, User};
use crate::session::{self, Session};
use crate::snapshot::Snapshot;
use crate::storage::{self, KeyValueStorage, MemoryStorage, STATE_SLOT};
use crate::tables::Tables;

const DEFAULT_NOTIFICATION_CAPACITY: usize = 256;

/// Single-writer Kanban state store.
///
/// Construct with [`KanbanStoreBuilder`]. Wrap in
/// [`SharedStore`](crate::shared::SharedStore) when more than one thread needs
/// access.
pub struct KanbanStore {
    tables: Tables,
    session: Session,
    storage: Box<dyn KeyValueStorage>,
    mirror_state: bool,
    change_tx: broadcast::Sender<ChangeNotification>,
}

impl std::fmt::Debug for KanbanStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanStore")
            .field("boards", &self.tables.boards.len())
            .field("columns", &self.tables.columns.len())
            .field("tasks", &self.tables.tasks.len())
            .field("session", &self.session)
            .field("mirror_state", &self.mirror_state)
            .finish()
    }
}

impl KanbanStore {
    /// A store with in-memory slots and default settings.
    pub fn in_memory() -> Self {
        let (change_tx, _) = broadcast::channel(DEFAULT_NOTIFICATION_CAPACITY);
        Self {
            tables: Tables::new(),
            session: Session::default(),
            storage: Box::new(MemoryStorage::new()),
            mirror_state: false,
            change_tx,
        }
    }

    /// Read-only view of the entity tables.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current user name; empty when none is set.
    pub fn current_user(&self) -> &str {
        self.session.current_user()
    }

    /// Owned, serializable copy of the entity tables.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_tables(&self.tables)
    }

    /// Subscribe to change notifications.
    pub fn change_rx(&self) -> broadcast::Receiver<ChangeNotification> {
        self.change_tx.subscribe()
    }

    pub(crate) fn change_sender(&self) -> broadcast::Sender<ChangeNotification> {
        self.change_tx.clone()
    }

    /// The durable slot backend.
    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    /// Apply one action. The single entry point the UI layer needs.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, StoreError> {
        let action_name = action.name();
        let result = match action {
            Action::SetCurrentUser { name } => {
                self.set_current_user(name);
                Ok(Outcome::Applied)
            }
            Action::CreateBoard { title, description } => {
                Ok(Outcome::BoardCreated(self.create_board(title, description)))
            }
            Action::DeleteBoard { board_id } => {
                self.delete_board(&board_id).map(|()| Outcome::Applied)
            }
            Action::CreateColumn { board_id, title } => self
                .create_column(&board_id, title)
                .map(Outcome::ColumnCreated),
            Action::UpdateColumn { column_id, title } => self
                .update_column(&column_id, title)
                .map(|()| Outcome::Applied),
            Action::DeleteColumn { column_id } => {
                self.delete_column(&column_id).map(|()| Outcome::Applied)
            }
            Action::CreateTask {
                column_id,
                title,
                description,
                assigned_to,
                priority,
                due_date,
            } => self
                .create_task(
                    &column_id,
                    TaskFields {
                        title,
                        description,
                        assigned_to,
                        priority,
                        due_date,
                    },
                )
                .map(Outcome::TaskCreated),
            Action::UpdateTask {
                task_id,
                title,
                description,
                assigned_to,
                priority,
                due_date,
            } => self
                .update_task(
                    &task_id,
                    TaskFields {
                        title,
                        description,
                        assigned_to,
                        priority,
                        due_date,
                    },
                )
                .map(|()| Outcome::Applied),
            Action::DeleteTask { task_id } => {
                self.delete_task(&task_id).map(|()| Outcome::Applied)
            }
            Action::MoveTask {
                task_id,
                from_column_id,
                to_column_id,
                new_index,
            } => self
                .move_task(&task_id, &from_column_id, &to_column_id, new_index)
                .map(|()| Outcome::Applied),
        };
        if let Err(e) = &result {
            log::warn!("Action {action_name} rejected: {e}");
        }
        result
    }

    /// Set the name stamped into `created_by` of new boards and tasks.
    pub fn set_current_user(&mut self, name: impl Into<String>) {
        self.session.set_current_user(name.into());
        self.notify(EntityKind::Session, WriteKind::Update, self.session.current_user().to_string());
    }

    pub fn create_board(&mut self, title: impl Into<String>, description: impl Into<String>) -> BoardId {
        let id = BoardId::new();
        let board = Board {
            id,
            title: title.into(),
            description: description.into(),
            created_by: self.session.author().to_string(),
            created_at: Utc::now(),
            column_ids: Vec::new(),
        };
        self.tables.boards.insert(id, board);
        log::debug!("Created board {id}");
        self.committed(EntityKind::Board, WriteKind::Insert, id);
        id
    }

    /// Delete a board, all of its columns and all of their tasks.
    pub fn delete_board(&mut self, board_id: &BoardId) -> Result<(), StoreError> {
        let board = self
            .tables
            .boards
            .remove(board_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Board, board_id))?;

        let mut tasks_removed = 0;
        for cid in &board.column_ids {
            tasks_removed += self.tables.drop_column(cid);
        }
        log::debug!(
            "Deleted board {board_id} with {} columns and {tasks_removed} tasks",
            board.column_ids.len()
        );
        self.committed(EntityKind::Board, WriteKind::Delete, board_id);
        Ok(())
    }

    /// Append a column to a board. Its `order` is the board's previous
    /// column count.
    pub fn create_column(&mut self, board_id: &BoardId, title: impl Into<String>) -> Result<ColumnId, StoreError> {
        let board = self
            .tables
            .boards
            .get_mut(board_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Board, board_id))?;

        let id = ColumnId::new();
        let column = Column {
            id,
            title: title.into(),
            board_id: *board_id,
            order: board.column_ids.len(),
            task_ids: Vec::new(),
        };
        board.column_ids.push(id);
        self.tables.columns.insert(id, column);
        log::debug!("Created column {id} in board {board_id}");
        self.committed(EntityKind::Column, WriteKind::Insert, id);
        Ok(id)
    }

    /// Replace a column's title. The title is stored as given.
    pub fn update_column(&mut self, column_id: &ColumnId, title: impl Into<String>) -> Result<(), StoreError> {
        let column = self
            .tables
            .columns
            .get_mut(column_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Column, column_id))?;
        column.title = title.into();
        log::debug!("Updated column {column_id}");
        self.committed(EntityKind::Column, WriteKind::Update, column_id);
        Ok(())
    }

    /// Delete a column and its tasks, and detach it from its board.
    pub fn delete_column(&mut self, column_id: &ColumnId) -> Result<(), StoreError> {
        let board_id = self
            .tables
            .columns
            .get(column_id)
            .map(|c| c.board_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Column, column_id))?;

        let tasks_removed = self.tables.drop_column(column_id);
        if let Some(board) = self.tables.boards.get_mut(&board_id) {
            board.column_ids.retain(|cid| cid != column_id);
        }
        self.tables.renumber_columns(&board_id);
        log::debug!("Deleted column {column_id} with {tasks_removed} tasks");
        self.committed(EntityKind::Column, WriteKind::Delete, column_id);
        Ok(())
    }

    /// Append a task to a column. Its `order` is the column's previous task
    /// count.
    pub fn create_task(&mut self, column_id: &ColumnId, fields: TaskFields) -> Result<TaskId, StoreError> {
        let column = self
            .tables
            .columns
            .get_mut(column_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Column, column_id))?;

        let id = TaskId::new();
        let task = Task {
            id,
            title: fields.title,
            description: fields.description,
            created_by: self.session.author().to_string(),
            assigned_to: fields.assigned_to,
            priority: fields.priority,
            due_date: fields.due_date,
            column_id: *column_id,
            order: column.task_ids.len(),
            created_at: Utc::now(),
        };
        column.task_ids.push(id);
        self.tables.tasks.insert(id, task);
        log::debug!("Created task {id} in column {column_id}");
        self.committed(EntityKind::Task, WriteKind::Insert, id);
        Ok(id)
    }

    /// Replace a task's editable fields. Column and rank are unchanged.
    pub fn update_task(&mut self, task_id: &TaskId, fields: TaskFields) -> Result<(), StoreError> {
        let task = self
            .tables
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, task_id))?;
        task.apply_fields(fields);
        log::debug!("Updated task {task_id}");
        self.committed(EntityKind::Task, WriteKind::Update, task_id);
        Ok(())
    }

    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<(), StoreError> {
        let task = self
            .tables
            .tasks
            .remove(task_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, task_id))?;
        if let Some(column) = self.tables.columns.get_mut(&task.column_id) {
            column.task_ids.retain(|tid| tid != task_id);
        }
        self.tables.renumber_tasks(&task.column_id);
        log::debug!("Deleted task {task_id}");
        self.committed(EntityKind::Task, WriteKind::Delete, task_id);
        Ok(())
    }

    /// Relocate a task to `new_index` in `to_column_id`.
    ///
    /// The task is lifted out of `from_column_id` first and then inserted at
    /// `min(new_index, len)` of the destination list as it stands after the
    /// removal. Within one column this is lift-and-reinsert, not a swap.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        new_index: usize,
    ) -> Result<(), StoreError> {
        let owner = self
            .tables
            .tasks
            .get(task_id)
            .map(|t| t.column_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, task_id))?;
        if !self.tables.columns.contains_key(from_column_id) {
            return Err(StoreError::not_found(EntityKind::Column, from_column_id));
        }
        if !self.tables.columns.contains_key(to_column_id) {
            return Err(StoreError::not_found(EntityKind::Column, to_column_id));
        }
        if owner != *from_column_id {
            return Err(StoreError::TaskNotInColumn {
                task: task_id.to_string(),
                column: from_column_id.to_string(),
            });
        }

        if let Some(from) = self.tables.columns.get_mut(from_column_id) {
            from.task_ids.retain(|tid| tid != task_id);
        }
        let mut index = new_index;
        if let Some(to) = self.tables.columns.get_mut(to_column_id) {
            index = new_index.min(to.task_ids.len());
            to.task_ids.insert(index, *task_id);
        }
        if let Some(task) = self.tables.tasks.get_mut(task_id) {
            task.column_id = *to_column_id;
        }
        self.tables.renumber_tasks(from_column_id);
        if from_column_id != to_column_id {
            self.tables.renumber_tasks(to_column_id);
        }

        log::debug!("Moved task {task_id} from {from_column_id} to {to_column_id} at {index}");
        self.committed(EntityKind::Task, WriteKind::Move, task_id);
        Ok(())
    }

    /// Sign in with the local stand-in and make the user current.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, StoreError> {
        let user = session::login(self.storage.as_ref(), email, password)?;
        self.session.sign_in(user.clone());
        self.notify(EntityKind::Session, WriteKind::Insert, user.id.to_string());
        Ok(user)
    }

    /// Register a local account and make it current.
    pub fn signup(&mut self, email: &str, password: &str, name: &str) -> Result<User, StoreError> {
        let user = session::signup(self.storage.as_ref(), email, password, name)?;
        self.session.sign_in(user.clone());
        self.notify(EntityKind::Session, WriteKind::Insert, user.id.to_string());
        Ok(user)
    }

    /// Clear the session and its persisted record.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        session::logout(self.storage.as_ref())?;
        let id = self
            .session
            .user()
            .map(|u| u.id.to_string())
            .unwrap_or_default();
        self.session.clear();
        self.notify(EntityKind::Session, WriteKind::Delete, id);
        Ok(())
    }

    /// Post-commit bookkeeping for an entity mutation: mirror, then notify.
    fn committed(&self, entity: EntityKind, kind: WriteKind, id: impl ToString) {
        if self.mirror_state {
            if let Err(e) = storage::write_json(self.storage.as_ref(), STATE_SLOT, &self.snapshot()) {
                log::warn!("Failed to mirror state: {e}");
            }
        }
        self.notify(entity, kind, id.to_string());
    }

    fn notify(&self, entity: EntityKind, kind: WriteKind, id: String) {
        // No subscribers is fine.
        let _ = self.change_tx.send(ChangeNotification { entity, kind, id });
    }
}

impl Default for KanbanStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Builder for [`KanbanStore`].
///
/// ```ignore
/// let store = KanbanStoreBuilder::new()
///     .with_storage(FileStorage::open("./data")?)
///     .with_state_mirror(true)
///     .build()?;
/// ```
pub struct KanbanStoreBuilder {
    storage: Option<Box<dyn KeyValueStorage>>,
    mirror_state: bool,
    notification_capacity: usize,
}

impl KanbanStoreBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            mirror_state: false,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }

    /// Use a durable slot backend instead of in-memory slots.
    pub fn with_storage(mut self, storage: impl KeyValueStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Persist the entity tables to the `kanban_state` slot after every
    /// mutation, and reload them on build.
    pub fn with_state_mirror(mut self, enabled: bool) -> Self {
        self.mirror_state = enabled;
        self
    }

    /// Buffer size of the change notification channel. Clamped to at least 1.
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity.max(1);
        self
    }

    /// Open the store, restoring the persisted session and, when the state
    /// mirror is on, the persisted tables.
    pub fn build(self) -> Result<KanbanStore, StoreError> {
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(MemoryStorage::new()) as Box<dyn KeyValueStorage>);

        let mut session = Session::default();
        if let Some(user) = session::restore(storage.as_ref())? {
            log::info!("Restored session for {}", user.email);
            session.sign_in(user);
        }

        let tables = if self.mirror_state {
            match storage::read_json::<Snapshot>(storage.as_ref(), STATE_SLOT)? {
                Some(snapshot) => snapshot.into_tables()?,
                None => Tables::new(),
            }
        } else {
            Tables::new()
        };

        let (change_tx, _) = broadcast::channel(self.notification_capacity);
        Ok(KanbanStore {
            tables,
            session,
            storage,
            mirror_state: self.mirror_state,
            change_tx,
        })
    }
}

impl Default for KanbanStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{ANONYMOUS_USER, Priority};

    fn fields(title: &str) -> TaskFields {
        TaskFields {
            title: title.into(),
            description: String::new(),
            assigned_to: String::new(),
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn column_of(store: &KanbanStore, id: &ColumnId) -> Vec<TaskId> {
        store.tables().column(id).unwrap().task_ids.clone()
    }

    #[test]
    fn test_create_board_stamps_anonymous_without_user() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "desc");
        let board = store.tables().board(&b).unwrap();
        assert_eq!(board.created_by, ANONYMOUS_USER);
        assert!(board.column_ids.is_empty());
    }

    #[test]
    fn test_create_board_stamps_current_user() {
        let mut store = KanbanStore::in_memory();
        store.set_current_user("ada");
        let b = store.create_board("B", "");
        assert_eq!(store.tables().board(&b).unwrap().created_by, "ada");
    }

    #[test]
    fn test_create_column_order_is_previous_length() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        for expected in 0..3 {
            let c = store.create_column(&b, format!("C{expected}")).unwrap();
            assert_eq!(store.tables().column(&c).unwrap().order, expected);
            assert_eq!(store.tables().board(&b).unwrap().column_ids.last(), Some(&c));
        }
        assert_eq!(store.tables().board(&b).unwrap().column_ids.len(), 3);
    }

    #[test]
    fn test_create_column_on_unknown_board_is_not_found() {
        let mut store = KanbanStore::in_memory();
        let err = store.create_column(&BoardId::new(), "C").unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: EntityKind::Board,
                ..
            }
        ));
        assert!(store.tables().is_empty());
    }

    #[test]
    fn test_update_column_keeps_title_verbatim() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let c = store.create_column(&b, "C").unwrap();
        store.update_column(&c, "  spaced  ").unwrap();
        assert_eq!(store.tables().column(&c).unwrap().title, "  spaced  ");
    }

    #[test]
    fn test_update_task_keeps_column_and_order() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let c = store.create_column(&b, "C").unwrap();
        store.create_task(&c, fields("first")).unwrap();
        let t = store.create_task(&c, fields("second")).unwrap();

        let mut update = fields("renamed");
        update.priority = Priority::High;
        update.assigned_to = "bob".into();
        store.update_task(&t, update).unwrap();

        let task = store.tables().task(&t).unwrap();
        assert_eq!(task.title, "renamed");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.assigned_to, "bob");
        assert_eq!(task.column_id, c);
        assert_eq!(task.order, 1);
    }

    #[test]
    fn test_delete_task_detaches_and_renumbers() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let c = store.create_column(&b, "C").unwrap();
        let t0 = store.create_task(&c, fields("0")).unwrap();
        let t1 = store.create_task(&c, fields("1")).unwrap();

        store.delete_task(&t0).unwrap();
        assert_eq!(column_of(&store, &c), vec![t1]);
        assert_eq!(store.tables().task(&t1).unwrap().order, 0);
        assert!(store.tables().task(&t0).is_none());
        store.tables().verify().unwrap();
    }

    #[test]
    fn test_missing_references_leave_tables_untouched() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let c = store.create_column(&b, "C").unwrap();
        let t = store.create_task(&c, fields("T")).unwrap();
        let before = store.tables().clone();

        assert!(store.delete_board(&BoardId::new()).is_err());
        assert!(store.update_column(&ColumnId::new(), "x").is_err());
        assert!(store.delete_column(&ColumnId::new()).is_err());
        assert!(store.create_task(&ColumnId::new(), fields("x")).is_err());
        assert!(store.update_task(&TaskId::new(), fields("x")).is_err());
        assert!(store.delete_task(&TaskId::new()).is_err());
        assert!(store.move_task(&t, &c, &ColumnId::new(), 0).is_err());
        assert!(store.move_task(&TaskId::new(), &c, &c, 0).is_err());

        assert_eq!(store.tables(), &before);
    }

    #[test]
    fn test_move_from_wrong_column_is_rejected() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let c1 = store.create_column(&b, "C1").unwrap();
        let c2 = store.create_column(&b, "C2").unwrap();
        let t = store.create_task(&c1, fields("T")).unwrap();

        let err = store.move_task(&t, &c2, &c1, 0).unwrap_err();
        assert!(matches!(err, StoreError::TaskNotInColumn { .. }));
        assert_eq!(column_of(&store, &c1), vec![t]);
        assert!(column_of(&store, &c2).is_empty());
    }

    #[test]
    fn test_move_index_is_clamped_to_length() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let c1 = store.create_column(&b, "C1").unwrap();
        let c2 = store.create_column(&b, "C2").unwrap();
        let a = store.create_task(&c2, fields("a")).unwrap();
        let t = store.create_task(&c1, fields("T")).unwrap();

        store.move_task(&t, &c1, &c2, 99).unwrap();
        assert_eq!(column_of(&store, &c2), vec![a, t]);
        assert_eq!(store.tables().task(&t).unwrap().order, 1);
        store.tables().verify().unwrap();
    }

    #[test]
    fn test_dispatch_routes_every_action() {
        let mut store = KanbanStore::in_memory();
        store
            .dispatch(Action::SetCurrentUser { name: "ada".into() })
            .unwrap();
        let Outcome::BoardCreated(b) = store
            .dispatch(Action::CreateBoard {
                title: "B".into(),
                description: String::new(),
            })
            .unwrap()
        else {
            panic!("expected a board");
        };
        let Outcome::ColumnCreated(c) = store
            .dispatch(Action::CreateColumn {
                board_id: b,
                title: "C".into(),
            })
            .unwrap()
        else {
            panic!("expected a column");
        };
        let Outcome::TaskCreated(t) = store.dispatch(Action::create_task(c, fields("T"))).unwrap()
        else {
            panic!("expected a task");
        };
        assert_eq!(store.tables().task(&t).unwrap().created_by, "ada");

        store
            .dispatch(Action::update_task(t, fields("T2")))
            .unwrap();
        store
            .dispatch(Action::UpdateColumn {
                column_id: c,
                title: "C2".into(),
            })
            .unwrap();
        store
            .dispatch(Action::MoveTask {
                task_id: t,
                from_column_id: c,
                to_column_id: c,
                new_index: 0,
            })
            .unwrap();
        store.dispatch(Action::DeleteTask { task_id: t }).unwrap();
        store
            .dispatch(Action::DeleteColumn { column_id: c })
            .unwrap();
        assert_eq!(
            store.dispatch(Action::DeleteBoard { board_id: b }).unwrap(),
            Outcome::Applied
        );
        assert!(store.tables().is_empty());
    }

    #[test]
    fn test_notifications_follow_successful_mutations_only() {
        let mut store = KanbanStore::in_memory();
        let mut rx = store.change_rx();

        let b = store.create_board("B", "");
        let note = rx.try_recv().unwrap();
        assert_eq!(note.entity, EntityKind::Board);
        assert_eq!(note.kind, WriteKind::Insert);
        assert_eq!(note.id, b.to_string());

        assert!(store.delete_column(&ColumnId::new()).is_err());
        assert!(rx.try_recv().is_err());

        let c = store.create_column(&b, "C").unwrap();
        let t = store.create_task(&c, fields("T")).unwrap();
        store.move_task(&t, &c, &c, 0).unwrap();
        let kinds: Vec<WriteKind> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|n| n.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![WriteKind::Insert, WriteKind::Insert, WriteKind::Move]
        );
    }

    #[test]
    fn test_login_sets_current_user_and_logout_clears_it() {
        let mut store = KanbanStore::in_memory();
        let user = store.login("ada@example.com", "pw").unwrap();
        assert_eq!(store.current_user(), "ada");
        assert_eq!(store.session().user(), Some(&user));

        let b = store.create_board("B", "");
        assert_eq!(store.tables().board(&b).unwrap().created_by, "ada");

        store.logout().unwrap();
        assert_eq!(store.current_user(), "");
        assert!(!store.session().is_authenticated());
    }

    #[test]
    fn test_failed_login_keeps_session() {
        let mut store = KanbanStore::in_memory();
        store.set_current_user("ada");
        assert!(matches!(
            store.login("", "pw"),
            Err(StoreError::Auth(_))
        ));
        assert_eq!(store.current_user(), "ada");
    }
}
