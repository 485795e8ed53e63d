pub mod clock;
pub mod queries;
mod table;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::info;

use mindful_types::models::{ChatMessage, JournalEntry, MoodEntry, User};

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
use table::Table;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

/// In-memory entity store. Nothing is persisted; a fresh `Store` is empty.
///
/// Each entity type sits behind its own lock, and its identifier sequence is
/// only advanced while that lock is held.
pub struct Store {
    clock: Arc<dyn Clock>,
    users: Mutex<Table<User>>,
    moods: Mutex<Table<MoodEntry>>,
    journals: Mutex<Table<JournalEntry>>,
    chats: Mutex<Table<ChatMessage>>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        info!("In-memory store initialised");
        Self {
            clock,
            users: Mutex::new(Table::new()),
            moods: Mutex::new(Table::new()),
            journals: Mutex::new(Table::new()),
            chats: Mutex::new(Table::new()),
        }
    }

    /// Current time according to the store clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables hold plain data, so a panic mid-insert cannot leave one half-written.
fn lock<T>(table: &Mutex<T>) -> MutexGuard<'_, T> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}
