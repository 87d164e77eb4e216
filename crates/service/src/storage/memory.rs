use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::kv_store::KvStore;

/// In-memory key-value map guarded by a reader/writer lock.
///
/// Readers run concurrently with each other; writers are exclusive. Contents
/// live for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<String, ServiceError> {
        let map = self.inner.read().await;
        map.get(key).cloned().ok_or_else(|| ServiceError::not_found("key"))
    }

    async fn post(&self, key: String, value: String) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        debug!(%key, "store upsert");
        map.insert(key, value);
        Ok(())
    }

    async fn put(&self, key: String, value: String) -> Result<(), ServiceError> {
        self.post(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        if map.remove(key).is_none() {
            return Err(ServiceError::not_found("key"));
        }
        Ok(())
    }
}
