//! Record storage for the session.
//!
//! [`RecordStore`] owns the session's [`RecordTable`] and the
//! [`RecordStorage`] it was loaded from. Handlers receive the store
//! explicitly; nothing here is global.

use tracing::{info, warn};

use crate::error::Result;
use crate::models::ClientRecord;

mod csv_file;
mod memory;
mod table;

pub use csv_file::CsvStorage;
pub use memory::MemoryStorage;
pub use table::{sort_by_date_desc, RecordTable};

/// Where a record table lives between sessions.
///
/// `persist` replaces whatever was stored before. Implementations do not
/// retry and do not recover from a failed write.
pub trait RecordStorage: std::fmt::Debug {
    fn load(&self) -> Result<RecordTable>;

    fn persist(&self, table: &RecordTable) -> Result<()>;

    /// Human-readable description of where the data lives.
    fn location(&self) -> String;
}

/// Session-scoped record table plus its backing storage.
#[derive(Debug)]
pub struct RecordStore {
    storage: Box<dyn RecordStorage>,
    table: RecordTable,
}

impl RecordStore {
    /// Load the table once from `storage`.
    pub fn open(storage: impl RecordStorage + 'static) -> Result<Self> {
        let table = storage.load()?;
        info!(location = %storage.location(), records = table.len(), "record table loaded");
        Ok(Self {
            storage: Box::new(storage),
            table,
        })
    }

    /// Store backed by [`MemoryStorage`], for tests and dry runs.
    pub fn open_memory() -> Self {
        Self {
            storage: Box::new(MemoryStorage::new()),
            table: RecordTable::new(),
        }
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    /// Append one record and rewrite the storage with the full table.
    ///
    /// The session table is replaced only after the write succeeds, so a
    /// failed write leaves both copies as they were.
    pub fn append_and_flush(&mut self, record: ClientRecord) -> Result<&ClientRecord> {
        let next = self.table.append(record);
        if let Err(e) = self.storage.persist(&next) {
            warn!(location = %self.storage.location(), error = %e, "persist failed, record discarded");
            return Err(e);
        }
        info!(location = %self.storage.location(), records = next.len(), "record table persisted");
        self.table = next;
        // Just appended, so the table cannot be empty.
        Ok(&self.table.records()[self.table.len() - 1])
    }
}
