use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for the key-value backend.
/// Implementations can be in-memory, file-backed, or remote; the dispatcher
/// only ever holds an injected `Arc<dyn KvStore>`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Value under `key`; absent keys fail with `NotFound`.
    async fn get(&self, key: &str) -> Result<String, ServiceError>;
    /// Insert or overwrite. Same semantics as `put`.
    async fn post(&self, key: String, value: String) -> Result<(), ServiceError>;
    /// Insert or overwrite. Same semantics as `post`.
    async fn put(&self, key: String, value: String) -> Result<(), ServiceError>;
    /// Remove `key`; absent keys fail with `NotFound`.
    async fn delete(&self, key: &str) -> Result<(), ServiceError>;
}
