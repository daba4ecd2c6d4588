//! In-memory repository for tests and local runs without a database
//!
//! Mirrors the Postgres adapter: keys start at 1 and are never reused,
//! stored values are normalized to column precision, and update and
//! remove on a missing key are no-ops.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicI32;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::{Entity, Repository};
use crate::db::keys::next_key;
use crate::db::StorageError;

pub struct InMemoryRepository<E> {
    rows: RwLock<BTreeMap<i32, E>>,
    next_id: AtomicI32,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn list_all(&self) -> Result<Vec<E>, StorageError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<E>, StorageError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn add(&self, draft: E::Draft) -> Result<E, StorageError> {
        let id = next_key(&self.next_id, E::RESOURCE)?;
        let entity = E::from_draft(id, draft).normalize();
        self.rows.write().await.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<(), StorageError> {
        let mut rows = self.rows.write().await;
        if let Some(slot) = rows.get_mut(&entity.id()) {
            *slot = entity.normalize();
        }
        Ok(())
    }

    async fn remove(&self, id: i32) -> Result<(), StorageError> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}
