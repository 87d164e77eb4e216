use std::collections::HashMap;

use models::user::{User, UserInput};
use tokio::sync::RwLock;
use uuid::Uuid;

/// The front end's own user map, keyed by server-assigned uuid.
/// Disjoint from the key-value store; the bridge between the two is the
/// JSON-RPC forward performed by the create handler.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<HashMap<Uuid, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }

    /// Assign a fresh id and store the record.
    pub async fn create(&self, input: UserInput) -> User {
        let user = User::from_input(Uuid::new_v4(), input);
        let mut map = self.inner.write().await;
        map.insert(user.id, user.clone());
        user
    }

    pub async fn list(&self) -> Vec<User> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<User> {
        let map = self.inner.read().await;
        map.get(&id).cloned()
    }

    /// Store the payload under the path id, inserting when absent.
    pub async fn upsert(&self, id: Uuid, input: UserInput) -> User {
        let user = User::from_input(id, input);
        let mut map = self.inner.write().await;
        map.insert(id, user.clone());
        user
    }

    /// Remove a user; returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut map = self.inner.write().await;
        map.remove(&id).is_some()
    }
}
