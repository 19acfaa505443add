//! Lift-and-reinsert semantics of `move_task`.

use chrono::NaiveDate;
use kanban_store::{ColumnId, KanbanStore, Priority, TaskFields, TaskId};

struct Fixture {
    store: KanbanStore,
    left: ColumnId,
    right: ColumnId,
    tasks: Vec<TaskId>,
}

/// `left` holds five tasks a..e, `right` is empty.
fn fixture() -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut store = KanbanStore::in_memory();
    let board = store.create_board("B", "");
    let left = store.create_column(&board, "Left").unwrap();
    let right = store.create_column(&board, "Right").unwrap();
    let tasks = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|title| {
            store
                .create_task(
                    &left,
                    TaskFields {
                        title: title.to_string(),
                        description: String::new(),
                        assigned_to: String::new(),
                        priority: Priority::Medium,
                        due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    },
                )
                .unwrap()
        })
        .collect();
    Fixture {
        store,
        left,
        right,
        tasks,
    }
}

fn titles(store: &KanbanStore, column: &ColumnId) -> Vec<String> {
    store
        .tables()
        .column_tasks(column)
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

fn assert_orders_match_positions(store: &KanbanStore, column: &ColumnId) {
    for (position, task) in store.tables().column_tasks(column).iter().enumerate() {
        assert_eq!(task.order, position, "task {}", task.title);
    }
}

#[test]
fn test_same_column_move_later_reinserts_after_removal() {
    let mut f = fixture();
    let c = f.tasks[2];
    f.store.move_task(&c, &f.left, &f.left, 3).unwrap();
    assert_eq!(titles(&f.store, &f.left), ["a", "b", "d", "c", "e"]);
    assert_orders_match_positions(&f.store, &f.left);
}

#[test]
fn test_same_column_move_to_end() {
    let mut f = fixture();
    let a = f.tasks[0];
    f.store.move_task(&a, &f.left, &f.left, 4).unwrap();
    assert_eq!(titles(&f.store, &f.left), ["b", "c", "d", "e", "a"]);
}

#[test]
fn test_same_column_move_to_front() {
    let mut f = fixture();
    let e = f.tasks[4];
    f.store.move_task(&e, &f.left, &f.left, 0).unwrap();
    assert_eq!(titles(&f.store, &f.left), ["e", "a", "b", "c", "d"]);
    assert_orders_match_positions(&f.store, &f.left);
}

#[test]
fn test_same_index_move_is_identity_and_idempotent() {
    let mut f = fixture();
    let b = f.tasks[1];
    f.store.move_task(&b, &f.left, &f.left, 1).unwrap();
    let once = f.store.tables().column(&f.left).unwrap().task_ids.clone();
    assert_eq!(once, f.tasks);

    f.store.move_task(&b, &f.left, &f.left, 1).unwrap();
    assert_eq!(f.store.tables().column(&f.left).unwrap().task_ids, once);
}

#[test]
fn test_cross_column_move_inserts_at_index() {
    let mut f = fixture();
    let (a, b, c) = (f.tasks[0], f.tasks[1], f.tasks[2]);
    f.store.move_task(&a, &f.left, &f.right, 0).unwrap();
    f.store.move_task(&b, &f.left, &f.right, 0).unwrap();
    f.store.move_task(&c, &f.left, &f.right, 1).unwrap();

    assert_eq!(titles(&f.store, &f.right), ["b", "c", "a"]);
    assert_eq!(titles(&f.store, &f.left), ["d", "e"]);
    assert_orders_match_positions(&f.store, &f.left);
    assert_orders_match_positions(&f.store, &f.right);
    assert_eq!(f.store.tables().task(&c).unwrap().column_id, f.right);
    f.store.tables().verify().unwrap();
}

#[test]
fn test_move_into_empty_column_clamps_index() {
    let mut f = fixture();
    let d = f.tasks[3];
    f.store.move_task(&d, &f.left, &f.right, 7).unwrap();
    assert_eq!(titles(&f.store, &f.right), ["d"]);
    assert_eq!(f.store.tables().task(&d).unwrap().order, 0);
}

#[test]
fn test_move_back_and_forth_keeps_every_task_listed_once() {
    let mut f = fixture();
    for (i, task) in f.tasks.clone().iter().enumerate() {
        f.store.move_task(task, &f.left, &f.right, i).unwrap();
        f.store.move_task(task, &f.right, &f.left, 0).unwrap();
        f.store.tables().verify().unwrap();
    }
    let left = &f.store.tables().column(&f.left).unwrap().task_ids;
    assert_eq!(left.len(), 5);
    assert!(f.store.tables().column(&f.right).unwrap().task_ids.is_empty());
}
