use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::errors::CoreError;
use crate::models::history::History;

use super::format;
use super::kv::KeyValueStore;

/// Outcome of reading the history blob.
#[derive(Debug)]
pub enum HistoryRead {
    /// At least one entry was stored.
    Loaded(History),
    /// Nothing (or an empty / non-array value) under the key.
    Empty,
    /// The store could not be read or the blob could not be decoded.
    Unavailable(CoreError),
}

impl HistoryRead {
    /// Collapse to a plain history: both `Empty` and `Unavailable`
    /// become an empty list.
    pub fn into_history(self) -> History {
        match self {
            HistoryRead::Loaded(history) => history,
            HistoryRead::Empty | HistoryRead::Unavailable(_) => Vec::new(),
        }
    }
}

/// Reads and writes the bounded history list stored under one key.
///
/// Store failures never reach the caller through `read_history` /
/// `write_history`; they are logged and the pipeline carries on.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the history, telling an empty store apart from a failing one.
    ///
    /// Flow: store.get(key) → JSON array check → Vec<HistoryEntry>
    pub async fn read(&self) -> HistoryRead {
        let blob = match self.store.get(&self.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return HistoryRead::Empty,
            Err(e) => {
                error!(key = %self.key, error = %e, "Error reading history from store");
                return HistoryRead::Unavailable(e);
            }
        };

        match format::decode_history(&blob) {
            Ok(Some(history)) if !history.is_empty() => HistoryRead::Loaded(history),
            Ok(Some(_)) => HistoryRead::Empty,
            Ok(None) => {
                warn!(key = %self.key, "Stored history is not a list, treating as empty");
                HistoryRead::Empty
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Error decoding stored history");
                HistoryRead::Unavailable(e)
            }
        }
    }

    /// Read the history; any failure yields an empty list.
    pub async fn read_history(&self) -> History {
        self.read().await.into_history()
    }

    /// Write the history, returning the store error if any.
    pub async fn try_write_history(&self, history: &History) -> Result<(), CoreError> {
        let blob = format::encode_history(history)?;
        self.store.put(&self.key, &blob).await?;
        debug!(key = %self.key, entries = history.len(), "History written");
        Ok(())
    }

    /// Best-effort write: errors are logged and swallowed.
    pub async fn write_history(&self, history: &History) {
        if let Err(e) = self.try_write_history(history).await {
            error!(key = %self.key, error = %e, "Failed to write price history to store");
        }
    }
}
