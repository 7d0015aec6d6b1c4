// ═══════════════════════════════════════════════════════════════════
// Storage Tests — blob format, MemoryStore, FileStore, HistoryStore
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::sync::Arc;

use exchange_rates_core::errors::CoreError;
use exchange_rates_core::models::history::{History, HistoryEntry};
use exchange_rates_core::storage::format::{decode_history, encode_history};
use exchange_rates_core::storage::kv::{FileStore, KeyValueStore, MemoryStore};
use exchange_rates_core::storage::manager::{HistoryRead, HistoryStore};

const KEY: &str = "price_history";

fn sample_history() -> History {
    vec![
        HistoryEntry::new("01/01, 10:00 a. m.", 36.0, 39.0, 40.0),
        HistoryEntry::new("01/01, 11:00 a. m.", 36.1, 39.2, 40.5),
    ]
}

/// A store whose every operation fails.
struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::Storage("store offline".into()))
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("store offline".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Blob format
// ═══════════════════════════════════════════════════════════════════

mod format {
    use super::*;

    #[test]
    fn encodes_as_json_array() {
        let blob = encode_history(&sample_history()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["bcv_eur"], 39.0);
        assert_eq!(value[1]["timestamp"], "01/01, 11:00 a. m.");
    }

    #[test]
    fn decodes_what_it_encodes() {
        let history = sample_history();
        let blob = encode_history(&history).unwrap();
        assert_eq!(decode_history(&blob).unwrap(), Some(history));
    }

    #[test]
    fn empty_array_decodes_to_empty_history() {
        assert_eq!(decode_history("[]").unwrap(), Some(vec![]));
    }

    #[test]
    fn non_array_value_is_none() {
        assert_eq!(decode_history(r#"{"bcv":1}"#).unwrap(), None);
        assert_eq!(decode_history("null").unwrap(), None);
        assert_eq!(decode_history("42").unwrap(), None);
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(
            decode_history("[{"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn array_of_wrong_shape_is_error() {
        assert!(matches!(
            decode_history(r#"[{"timestamp":"x"}]"#),
            Err(CoreError::Deserialization(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(KEY).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryStore::new();
        store.put(KEY, "[1]").await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = MemoryStore::new();
        store.put(KEY, "a").await.unwrap();
        store.put(KEY, "b").await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.put(KEY, "[]").await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("price_history.json").exists());
        assert!(!dir.path().join("price_history.json.tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("kv").join("rates");
        let store = FileStore::new(&nested);
        store.put(KEY, "[]").await.unwrap();
        assert!(nested.join("price_history.json").exists());
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for key in ["", "..", "../escape", "a/b"] {
            assert!(
                matches!(store.put(key, "x").await, Err(CoreError::Storage(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn survives_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path()).put(KEY, "persisted").await.unwrap();
        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get(KEY).await.unwrap().as_deref(), Some("persisted"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// HistoryStore
// ═══════════════════════════════════════════════════════════════════

mod history_store {
    use super::*;

    fn memory() -> (Arc<MemoryStore>, HistoryStore) {
        let kv = Arc::new(MemoryStore::new());
        let store = HistoryStore::new(kv.clone(), KEY);
        (kv, store)
    }

    #[tokio::test]
    async fn empty_store_reads_empty() {
        let (_, store) = memory();
        assert!(matches!(store.read().await, HistoryRead::Empty));
        assert!(store.read_history().await.is_empty());
    }

    #[tokio::test]
    async fn stored_empty_array_reads_empty() {
        let (kv, store) = memory();
        kv.put(KEY, "[]").await.unwrap();
        assert!(matches!(store.read().await, HistoryRead::Empty));
    }

    #[tokio::test]
    async fn non_array_value_reads_empty() {
        let (kv, store) = memory();
        kv.put(KEY, r#"{"legacy":true}"#).await.unwrap();
        assert!(matches!(store.read().await, HistoryRead::Empty));
    }

    #[tokio::test]
    async fn corrupt_blob_is_unavailable() {
        let (kv, store) = memory();
        kv.put(KEY, "[{not json").await.unwrap();
        assert!(matches!(store.read().await, HistoryRead::Unavailable(_)));
        assert!(store.read_history().await.is_empty());
    }

    #[tokio::test]
    async fn write_then_read() {
        let (_, store) = memory();
        store.write_history(&sample_history()).await;
        match store.read().await {
            HistoryRead::Loaded(history) => assert_eq!(history, sample_history()),
            other => panic!("Expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn uses_configured_key() {
        let kv = Arc::new(MemoryStore::new());
        let store = HistoryStore::new(kv.clone(), "other_key");
        store.write_history(&sample_history()).await;
        assert_eq!(store.key(), "other_key");
        assert!(kv.get("other_key").await.unwrap().is_some());
        assert!(kv.get(KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn broken_store_read_is_unavailable() {
        let store = HistoryStore::new(Arc::new(BrokenStore), KEY);
        match store.read().await {
            HistoryRead::Unavailable(CoreError::Storage(msg)) => {
                assert_eq!(msg, "store offline")
            }
            other => panic!("Expected Unavailable, got {other:?}"),
        }
        assert!(store.read_history().await.is_empty());
    }

    #[tokio::test]
    async fn broken_store_write_is_swallowed() {
        let store = HistoryStore::new(Arc::new(BrokenStore), KEY);
        store.write_history(&sample_history()).await;
        assert!(store.try_write_history(&sample_history()).await.is_err());
    }

    #[tokio::test]
    async fn history_survives_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(Arc::new(FileStore::new(dir.path())), KEY);
        store.write_history(&sample_history()).await;

        let reopened = HistoryStore::new(Arc::new(FileStore::new(dir.path())), KEY);
        assert_eq!(reopened.read_history().await, sample_history());
    }
}
