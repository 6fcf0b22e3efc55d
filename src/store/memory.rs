use std::cell::{Cell, RefCell};

use super::{RecordStorage, RecordTable};
use crate::error::{PersistenceError, Result};

/// In-process storage. Nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: RefCell<RecordTable>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts out holding `table`, as if it had been persisted earlier.
    pub fn with_table(table: RecordTable) -> Self {
        Self {
            saved: RefCell::new(table),
            ..Self::default()
        }
    }

    /// Make every following `persist` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn saved(&self) -> RecordTable {
        self.saved.borrow().clone()
    }
}

impl RecordStorage for MemoryStorage {
    fn load(&self) -> Result<RecordTable> {
        Ok(self.saved.borrow().clone())
    }

    fn persist(&self, table: &RecordTable) -> Result<()> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Unavailable("memory storage is read-only".into()).into());
        }
        *self.saved.borrow_mut() = table.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
