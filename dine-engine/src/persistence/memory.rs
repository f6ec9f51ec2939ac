//! Process-local snapshot store

use super::{SnapshotStore, StorageResult};
use parking_lot::Mutex;
use shared::models::PosSnapshot;

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    inner: Mutex<Option<PosSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: PosSnapshot) -> Self {
        Self {
            inner: Mutex::new(Some(snapshot)),
        }
    }

    /// Last saved snapshot
    pub fn current(&self) -> Option<PosSnapshot> {
        self.inner.lock().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> StorageResult<Option<PosSnapshot>> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, snapshot: &PosSnapshot) -> StorageResult<()> {
        *self.inner.lock() = Some(snapshot.clone());
        Ok(())
    }
}
