//! Defined-key cache shared by lint rules.
//!
//! Entries are keyed by the canonical path of a message document and are
//! invalidated whenever the file's modification time changes.

use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
    time::SystemTime,
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::parsers::json::MessageDocument;

struct CachedKeys {
    modified: SystemTime,
    keys: Arc<BTreeSet<String>>,
}

#[derive(Default)]
pub struct KeyCache {
    entries: RwLock<HashMap<PathBuf, CachedKeys>>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattened keys of the document at `path`, loading it on a miss.
    ///
    /// Concurrent misses for the same file may both load it; they store the
    /// same value.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<BTreeSet<String>>> {
        let canonical = fs::canonicalize(path)
            .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
        let modified = fs::metadata(&canonical)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read metadata: {}", canonical.display()))?;

        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = entries.get(&canonical)
                && cached.modified == modified
            {
                debug!(path = %canonical.display(), "key cache hit");
                return Ok(Arc::clone(&cached.keys));
            }
        }

        debug!(path = %canonical.display(), "key cache miss");
        let keys = Arc::new(MessageDocument::open(&canonical)?.keys());

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            canonical,
            CachedKeys {
                modified,
                keys: Arc::clone(&keys),
            },
        );
        Ok(keys)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
