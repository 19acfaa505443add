//! Replays JSON-encoded store actions read from stdin, one per line, then
//! prints every board.
//!
//! Configuration comes from the environment (a `.env` file is honoured):
//!
//! - `KANBAN_DATA_DIR` — slot directory (default `./kanban-data`)
//! - `KANBAN_MIRROR_STATE` — persist the boards between runs (default `true`)
//! - `KANBAN_EMAIL` / `KANBAN_PASSWORD` — sign in before replaying
//! - `KANBAN_SEARCH`, `KANBAN_PRIORITY`, `KANBAN_SORT` — view settings
//! - `RUST_LOG` — log filter

use std::error::Error;
use std::io::BufRead;

use dotenvy::dotenv;
use kanban_store::storage::FileStorage;
use kanban_store::view::{self, PriorityFilter, SortKey, TaskFilter};
use kanban_store::{Action, KanbanStore, KanbanStoreBuilder};

const DEFAULT_DATA_DIR: &str = "./kanban-data";

struct Settings {
    data_dir: String,
    mirror_state: bool,
    credentials: Option<(String, String)>,
    filter: TaskFilter,
    sort: SortKey,
}

impl Settings {
    fn from_env() -> Result<Self, Box<dyn Error>> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let mirror_state = match var("KANBAN_MIRROR_STATE") {
            Some(v) => v.parse::<bool>()?,
            None => true,
        };
        let credentials = var("KANBAN_EMAIL").zip(var("KANBAN_PASSWORD"));
        let priority = match var("KANBAN_PRIORITY") {
            Some(v) => v.parse::<PriorityFilter>()?,
            None => PriorityFilter::All,
        };
        let sort = match var("KANBAN_SORT") {
            Some(v) => v.parse::<SortKey>()?,
            None => SortKey::default(),
        };

        Ok(Self {
            data_dir: var("KANBAN_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            mirror_state,
            credentials,
            filter: TaskFilter::new(var("KANBAN_SEARCH").unwrap_or_default(), priority),
            sort,
        })
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let settings = Settings::from_env()?;
    let mut store = KanbanStoreBuilder::new()
        .with_storage(FileStorage::open(&settings.data_dir)?)
        .with_state_mirror(settings.mirror_state)
        .build()?;
    log::info!("Opened store in {}", settings.data_dir);

    if let Some((email, password)) = &settings.credentials {
        let user = store.login(email, password)?;
        println!("signed in as {}", user.name);
    }

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        match serde_json::from_str::<Action>(trimmed) {
            Ok(action) => match store.dispatch(action) {
                Ok(outcome) => println!("{}", serde_json::to_string(&outcome)?),
                Err(e) => println!("error: {e}"),
            },
            Err(e) => println!("invalid action: {e}"),
        }
    }

    print_boards(&store, &settings);
    Ok(())
}

fn print_boards(store: &KanbanStore, settings: &Settings) {
    let today = chrono::Local::now().date_naive();
    for board in view::boards_by_creation(store.tables()) {
        println!();
        println!("# {} [{}] by {}", board.title, board.id, board.created_by);
        let Some(columns) = view::board_view(store.tables(), &board.id, &settings.filter, settings.sort)
        else {
            continue;
        };
        for column in columns {
            println!("## {} [{}]", column.column.title, column.column.id);
            for task in column.tasks {
                let overdue = if view::is_overdue(task, today) { " OVERDUE" } else { "" };
                println!(
                    "- [{}] {} ({}, due {}{}) [{}]",
                    task.priority, task.title, task.assigned_to, task.due_date, overdue, task.id
                );
            }
        }
    }
}
