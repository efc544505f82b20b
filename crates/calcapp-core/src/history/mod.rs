//! Client-side evaluation history.
//!
//! [`HistoryStore`] owns both the in-memory log and its durable mirror. All
//! mutations go through it so the newest-first order and the capacity bound
//! hold everywhere.
//!
//! # Lifecycle
//!
//! ```text
//! new()      → Prerender  (empty log, storage untouched)
//! hydrate()  → Hydrated   (persisted log loaded, every mutation persisted)
//! ```
//!
//! Storage is never read or written during `Prerender`, so a view rendered
//! before the runtime is ready always sees the same empty log.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::model::{HistoryEntry, HISTORY_CAPACITY, HISTORY_STORAGE_KEY};

mod storage;

pub use storage::{DurableStorage, FileStorage, MemoryStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationPhase {
    Prerender,
    Hydrated,
}

/// What happened to the durable mirror after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Full log written.
    Saved,
    /// Nothing written: not hydrated yet, or nothing changed.
    Skipped,
    /// Write failed; the in-memory log is authoritative for this session.
    MemoryOnly(StorageError),
}

impl Persistence {
    pub fn warning(&self) -> Option<&StorageError> {
        match self {
            Self::MemoryOnly(err) => Some(err),
            _ => None,
        }
    }
}

pub struct HistoryStore {
    storage: Arc<dyn DurableStorage>,
    key: String,
    entries: Vec<HistoryEntry>,
    phase: HydrationPhase,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            storage,
            key: HISTORY_STORAGE_KEY.to_string(),
            entries: Vec::new(),
            phase: HydrationPhase::Prerender,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn phase(&self) -> HydrationPhase {
        self.phase
    }

    pub fn is_hydrated(&self) -> bool {
        self.phase == HydrationPhase::Hydrated
    }

    /// Load the persisted log. Runs once; later calls are no-ops.
    ///
    /// Read or decode failures degrade to an empty log. Entries appended
    /// during prerender stay in front of the loaded ones, and the merged log
    /// is written back.
    pub fn hydrate(&mut self) -> Persistence {
        if self.is_hydrated() {
            return Persistence::Skipped;
        }

        let pending = std::mem::take(&mut self.entries);
        let mut entries = pending.clone();
        entries.extend(self.load_persisted());
        entries.truncate(HISTORY_CAPACITY);

        self.entries = entries;
        self.phase = HydrationPhase::Hydrated;
        debug!(
            entries = self.entries.len(),
            pending = pending.len(),
            "history hydrated"
        );

        if pending.is_empty() {
            Persistence::Skipped
        } else {
            self.persist()
        }
    }

    /// Prepend `entry`, evicting the oldest entries beyond capacity.
    pub fn append(&mut self, entry: HistoryEntry) -> Persistence {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    pub fn clear(&mut self) -> Persistence {
        self.entries.clear();
        self.persist()
    }

    pub fn select(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load_persisted(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to load history from storage");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring malformed persisted history");
                Vec::new()
            }
        }
    }

    fn persist(&self) -> Persistence {
        if !self.is_hydrated() {
            return Persistence::Skipped;
        }

        let result = serde_json::to_string(&self.entries)
            .map_err(|e| StorageError::Encode {
                message: e.to_string(),
            })
            .and_then(|json| self.storage.set_item(&self.key, &json));

        match result {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!(error = %e, "failed to persist history");
                Persistence::MemoryOnly(e)
            }
        }
    }
}
