//! Derived views: filtered, sorted task lists computed on demand.
//!
//! Nothing here is stored. Every function reads [`Tables`] and returns
//! references into it, so views are recomputed after each change
//! notification.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};

use crate::error::ParseError;
use crate::model::{Board, BoardId, Column, Priority, Task};
use crate::tables::Tables;

/// Priority filter selected in the board toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl FromStr for PriorityFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PriorityFilter::All),
            other => other.parse().map(PriorityFilter::Only),
        }
    }
}

/// Search text plus priority filter. Both must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: String,
    pub priority: PriorityFilter,
}

impl TaskFilter {
    pub fn new(search: impl Into<String>, priority: PriorityFilter) -> Self {
        Self {
            search: search.into(),
            priority,
        }
    }

    /// Whether the task passes both the search and the priority filter.
    ///
    /// Search is a case-insensitive substring match against title,
    /// description and assignee. An empty search matches everything.
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
            || task.assigned_to.to_lowercase().contains(&needle);

        let matches_priority = match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => task.priority == p,
        };

        matches_search && matches_priority
    }
}

/// Sort key for the tasks of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// High before medium before low.
    Priority,
    /// Earliest due date first.
    #[default]
    DueDate,
    /// Assignee name, ascending.
    Assignee,
    /// Rank within the column.
    Order,
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(SortKey::Priority),
            "dueDate" => Ok(SortKey::DueDate),
            "assignedTo" => Ok(SortKey::Assignee),
            "order" => Ok(SortKey::Order),
            other => Err(ParseError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            SortKey::Priority => "priority",
            SortKey::DueDate => "dueDate",
            SortKey::Assignee => "assignedTo",
            SortKey::Order => "order",
        };
        f.write_str(token)
    }
}

/// Stable sort. Ties keep their input order.
pub fn sort_tasks(tasks: &mut [&Task], key: SortKey) {
    match key {
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight())),
        SortKey::DueDate => tasks.sort_by_key(|t| t.due_date),
        SortKey::Assignee => match name_collator() {
            Some(collator) => {
                tasks.sort_by(|a, b| collator.compare(&a.assigned_to, &b.assigned_to))
            }
            None => tasks.sort_by(|a, b| a.assigned_to.cmp(&b.assigned_to)),
        },
        SortKey::Order => tasks.sort_by_key(|t| t.order),
    }
}

/// Root-locale collator at the default (tertiary) strength: accents and case
/// only break ties between otherwise equal names, lowercase first.
fn name_collator() -> Option<CollatorBorrowed<'static>> {
    match Collator::try_new(Default::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            log::warn!("Collation data unavailable, sorting assignees by code point: {err}");
            None
        }
    }
}

/// A column with the tasks that survive the current filter, sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

/// Tasks owned by a column that pass `filter`, sorted by `key`.
pub fn column_tasks<'a>(
    tables: &'a Tables,
    column: &'a Column,
    filter: &TaskFilter,
    key: SortKey,
) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = column
        .task_ids
        .iter()
        .filter_map(|id| tables.task(id))
        .filter(|task| filter.matches(task))
        .collect();
    sort_tasks(&mut tasks, key);
    tasks
}

/// All columns of a board, in board order, each with its filtered and sorted
/// tasks. `None` if the board does not exist.
pub fn board_view<'a>(
    tables: &'a Tables,
    board_id: &BoardId,
    filter: &TaskFilter,
    key: SortKey,
) -> Option<Vec<ColumnView<'a>>> {
    tables.board(board_id)?;
    Some(
        tables
            .board_columns(board_id)
            .into_iter()
            .map(|column| ColumnView {
                column,
                tasks: column_tasks(tables, column, filter, key),
            })
            .collect(),
    )
}

/// Boards ordered by creation time, oldest first.
pub fn boards_by_creation(tables: &Tables) -> Vec<&Board> {
    let mut boards: Vec<&Board> = tables.boards().values().collect();
    boards.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    boards
}

/// A task is overdue once its due date is strictly before `today`.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today
}
