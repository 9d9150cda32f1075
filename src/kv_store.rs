use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

/// A string-to-string key-value backend.
///
/// `get` returns `Ok(None)` for a key that was never set; `Err` is reserved
/// for backend faults.
#[async_trait]
pub trait Database: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn len(&self) -> Result<usize>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct KVStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl KVStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn set(&self, key: &str, value: String) {
        let mut store = self.inner.write().await;
        store.insert(key.to_string(), value);
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.read().await;
        store.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl Database for KVStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(KVStore::get(self, key).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        KVStore::set(self, key, value).await;
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(KVStore::len(self).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = KVStore::new();
        store.set("foo", "bar".to_string()).await;
        assert_eq!(store.get("foo").await, Some("bar".to_string()));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = KVStore::new();
        assert_eq!(store.get("missing").await, None);
        assert_eq!(store.get("").await, None);
    }

    #[tokio::test]
    async fn test_empty_value_is_stored() {
        let store = KVStore::new();
        store.set("blank", String::new()).await;
        assert_eq!(store.get("blank").await, Some(String::new()));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = KVStore::new();
        store.set("k", "v1".to_string()).await;
        store.set("k", "v2".to_string()).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_repeated_set_is_idempotent() {
        let store = KVStore::new();
        store.set("k", "v".to_string()).await;
        store.set("k", "v".to_string()).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = KVStore::new();
        let other = store.clone();
        other.set("shared", "yes".to_string()).await;
        assert_eq!(store.get("shared").await.as_deref(), Some("yes"));
    }

    #[tokio::test]
    async fn test_separate_stores_are_isolated() {
        let a = KVStore::new();
        let b = KVStore::new();
        a.set("k", "a".to_string()).await;
        assert!(b.is_empty().await);
        assert_eq!(b.get("k").await, None);
    }

    #[tokio::test]
    async fn test_database_trait_wraps_store() {
        let store = KVStore::new();
        let db: &dyn Database = &store;
        db.set("foo", "bar".to_string()).await.unwrap();
        assert_eq!(db.get("foo").await.unwrap(), Some("bar".to_string()));
        assert_eq!(db.get("nope").await.unwrap(), None);
    }
}
