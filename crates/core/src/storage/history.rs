use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clipboard::{copy_with_fallback, Clipboard, CopyOutcome, FallbackCopy};
use crate::errors::CoreError;
use crate::models::history::{HistoryRecord, HistoryRow, HistoryView};

use super::backend::StorageBackend;

/// Separator between the fields of one exported history line.
pub const EXPORT_FIELD_SEPARATOR: &str = " | ";

/// Ordered, persisted list of saved calculations, most recent first.
///
/// Every mutation rewrites the whole snapshot under `key`. Loading never
/// fails: a missing or malformed snapshot yields an empty history.
pub struct HistoryStore<T> {
    key: String,
    entries: Vec<T>,
    backend: Box<dyn StorageBackend>,
}

impl<T> std::fmt::Debug for HistoryStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<T> HistoryStore<T>
where
    T: Serialize + DeserializeOwned + HistoryRecord,
{
    /// Open the history stored under `key`.
    pub fn load(backend: Box<dyn StorageBackend>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = read_snapshot(backend.as_ref(), &key);
        Self {
            key,
            entries,
            backend,
        }
    }

    /// Discard in-memory state and read the snapshot again.
    pub fn reload(&mut self) {
        self.entries = read_snapshot(self.backend.as_ref(), &self.key);
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend `entry` and persist.
    pub fn add(&mut self, entry: T) -> Result<(), CoreError> {
        self.entries.insert(0, entry);
        self.persist()
    }

    /// Delete the entry at `index` and persist.
    /// Returns `false` (and writes nothing) when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<bool, CoreError> {
        if index >= self.entries.len() {
            debug!("history '{}': ignoring removal of index {index}", self.key);
            return Ok(false);
        }
        self.entries.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Like [`remove`](Self::remove), for an index still in text form.
    /// Text that is not a non-negative integer is ignored.
    pub fn remove_raw(&mut self, raw: &str) -> Result<bool, CoreError> {
        match parse_index(raw) {
            Some(index) => self.remove(index),
            None => {
                debug!("history '{}': ignoring non-numeric index '{raw}'", self.key);
                Ok(false)
            }
        }
    }

    /// Drop every entry and persist the empty collection.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.entries.clear();
        self.persist()
    }

    /// Table view of the history, or the explicit empty state.
    #[must_use]
    pub fn render(&self) -> HistoryView {
        if self.entries.is_empty() {
            return HistoryView::Empty;
        }
        let rows = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryRow {
                number: index + 1,
                index,
                columns: entry.columns(),
            })
            .collect();
        HistoryView::Rows(rows)
    }

    /// One line per entry, `#n` first, fields joined by ` | `.
    /// `None` when there is nothing to export.
    #[must_use]
    pub fn export_text(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut fields = vec![format!("#{}", index + 1)];
                fields.extend(entry.export_fields());
                fields.join(EXPORT_FIELD_SEPARATOR)
            })
            .collect();
        Some(lines.join("\n"))
    }

    /// Copy [`export_text`](Self::export_text) to the clipboard, using the
    /// fallback path if the clipboard rejects it. Failures are never surfaced.
    pub async fn copy(&self, clipboard: &dyn Clipboard, fallback: &dyn FallbackCopy) -> CopyOutcome {
        match self.export_text() {
            Some(text) => copy_with_fallback(clipboard, fallback, &text).await,
            None => CopyOutcome::Nothing,
        }
    }

    fn persist(&self) -> Result<(), CoreError> {
        let json = serde_json::to_string(&self.entries).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize history '{}': {e}", self.key))
        })?;
        self.backend.set_item(&self.key, &json)?;
        debug!("history '{}': persisted {} entries", self.key, self.entries.len());
        Ok(())
    }
}

/// Read and decode a snapshot, mapping every failure to an empty history.
/// Parse a row index typed by the user: surrounding whitespace is ignored,
/// anything but a non-negative integer yields `None`.
#[must_use]
pub fn parse_index(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

fn read_snapshot<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Vec<T> {
    match try_read_snapshot(backend, key) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("history '{key}': discarding unreadable snapshot: {e}");
            Vec::new()
        }
    }
}

fn try_read_snapshot<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> Result<Vec<T>, CoreError> {
    match backend.get_item(key)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}
