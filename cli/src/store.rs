//! File-backed storage binding — the CLI's stand-in for the browser's
//! persistent store. One JSON object per session file, flushed on every
//! mutation.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use eventboard::storage::Storage;

pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Load the session file if it exists; unreadable content starts the
    /// store empty, per the storage contract.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries: Mutex::new(entries) }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Storage is infallible by contract; a failed write only costs
    /// persistence across runs.
    fn flush(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }
        if let Ok(raw) = serde_json::to_string_pretty(entries) {
            let _ = fs::write(&self.path, raw);
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries();
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries();
        entries.remove(key);
        self.flush(&entries);
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
