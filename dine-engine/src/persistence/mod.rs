//! Snapshot persistence
//!
//! The engine treats storage as an opaque provider of one `PosSnapshot`.
//! Failures are reported to the caller, which logs them and keeps running
//! from memory.

mod memory;
mod redb_store;

pub use memory::MemorySnapshotStore;
pub use redb_store::RedbSnapshotStore;

use shared::models::PosSnapshot;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Load / save the whole POS state
pub trait SnapshotStore: Send + Sync {
    /// `None` when nothing was saved yet
    fn load(&self) -> StorageResult<Option<PosSnapshot>>;

    fn save(&self, snapshot: &PosSnapshot) -> StorageResult<()>;
}
