//! In-memory repository
//!
//! A [`Repository`] backed by a map instead of the remote API. Identifiers
//! are assigned sequentially starting at 1, the way the remote service does.
//! Used as the backing store of test doubles.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use hoops_core::Entity;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, Result};
use crate::repository::Repository;

#[derive(Debug)]
struct Store<T> {
    next_id: i32,
    entities: BTreeMap<i32, T>,
}

/// Thread-safe in-memory implementation of [`Repository`]
///
/// Clones share the same store.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    store: Arc<Mutex<Store<T>>>,
}

impl<T: Entity> MemoryRepository<T> {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                next_id: 1,
                entities: BTreeMap::new(),
            })),
        }
    }

    /// Stores `entity` under a fresh identifier and returns the stored copy
    pub fn insert(&self, mut entity: T) -> T {
        let mut store = self.lock();
        entity.set_id(store.next_id);
        store.next_id += 1;
        store.entities.insert(entity.id(), entity.clone());
        entity
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.lock().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Store<T>> {
        // A poisoned store still holds consistent data: every mutation is a
        // single map operation.
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn check(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(ClientError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>> {
        check(cancel)?;
        Ok(self.lock().entities.values().cloned().collect())
    }

    async fn get(&self, id: i32, cancel: &CancellationToken) -> Result<Option<T>> {
        check(cancel)?;
        Ok(self.lock().entities.get(&id).cloned())
    }

    async fn add(&self, entity: &T, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        self.insert(entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &T, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        match self.lock().entities.get_mut(&entity.id()) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(())
            }
            None => Err(ClientError::NotFound(format!(
                "{}/{}",
                T::RESOURCE,
                entity.id()
            ))),
        }
    }

    async fn delete(&self, id: i32, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        match self.lock().entities.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ClientError::NotFound(format!("{}/{}", T::RESOURCE, id))),
        }
    }
}
