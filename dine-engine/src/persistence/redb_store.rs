//! redb-backed snapshot store
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `pos_snapshot` | `"current"` | JSON-serialized `PosSnapshot` |

use super::{SnapshotStore, StorageResult};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::PosSnapshot;
use std::path::Path;
use std::sync::Arc;

const SNAPSHOT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("pos_snapshot");

const CURRENT_KEY: &str = "current";

#[derive(Clone)]
pub struct RedbSnapshotStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSnapshotStore").finish_non_exhaustive()
    }
}

impl RedbSnapshotStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOT_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl SnapshotStore for RedbSnapshotStore {
    fn load(&self) -> StorageResult<Option<PosSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOT_TABLE)?;

        match table.get(CURRENT_KEY)? {
            Some(value) => {
                let snapshot: PosSnapshot = serde_json::from_slice(value.value())?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &PosSnapshot) -> StorageResult<()> {
        let bytes = serde_json::to_vec(snapshot)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SNAPSHOT_TABLE)?;
            table.insert(CURRENT_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        tracing::trace!(bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }
}
