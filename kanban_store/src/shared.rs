//! Thread-safe handle around a [`KanbanStore`].
//!
//! A move touches one task and up to two columns at once, so the whole store
//! is the unit of locking: every write holds the write lock for the full
//! mutation and every read sees a completed one.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::messages::{Action, ChangeNotification, Outcome};
use crate::store::KanbanStore;

#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<KanbanStore>>,
    change_tx: broadcast::Sender<ChangeNotification>,
}

impl SharedStore {
    pub fn new(store: KanbanStore) -> Self {
        // Relay subscriptions through a sender clone so subscribing never
        // contends for the store lock.
        let change_tx = store.change_sender();
        Self {
            inner: Arc::new(RwLock::new(store)),
            change_tx,
        }
    }

    /// Apply one action under the write lock.
    pub fn dispatch(&self, action: Action) -> Result<Outcome, StoreError> {
        let mut store = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        store.dispatch(action)
    }

    /// Run a closure with exclusive access, for multi-step edits that must
    /// not interleave with other writers.
    pub fn write<R>(&self, f: impl FnOnce(&mut KanbanStore) -> R) -> Result<R, StoreError> {
        let mut store = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&mut store))
    }

    /// Run a closure against a consistent view of the store.
    pub fn read<R>(&self, f: impl FnOnce(&KanbanStore) -> R) -> Result<R, StoreError> {
        let store = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&store))
    }

    pub fn change_rx(&self) -> broadcast::Receiver<ChangeNotification> {
        self.change_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Priority, TaskFields};

    #[test]
    fn test_concurrent_moves_keep_tables_consistent() {
        let mut store = KanbanStore::in_memory();
        let b = store.create_board("B", "");
        let left = store.create_column(&b, "Left").unwrap();
        let right = store.create_column(&b, "Right").unwrap();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                store
                    .create_task(
                        &left,
                        TaskFields {
                            title: format!("T{i}"),
                            description: String::new(),
                            assigned_to: String::new(),
                            priority: Priority::Low,
                            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        },
                    )
                    .unwrap()
            })
            .collect();

        let shared = SharedStore::new(store);
        let handles: Vec<_> = tasks
            .into_iter()
            .enumerate()
            .map(|(i, task_id)| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .dispatch(Action::MoveTask {
                            task_id,
                            from_column_id: left,
                            to_column_id: right,
                            new_index: i % 3,
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared
            .read(|store| {
                store.tables().verify().unwrap();
                assert!(store.tables().column(&left).unwrap().task_ids.is_empty());
                assert_eq!(store.tables().column(&right).unwrap().task_ids.len(), 8);
            })
            .unwrap();
    }

    #[test]
    fn test_subscribers_see_dispatches() {
        let shared = SharedStore::new(KanbanStore::in_memory());
        let mut rx = shared.change_rx();
        shared
            .dispatch(Action::CreateBoard {
                title: "B".into(),
                description: String::new(),
            })
            .unwrap();
        assert!(rx.try_recv().is_ok());
    }
}
