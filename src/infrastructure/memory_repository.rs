//! 内存仓储
//!
//! 不依赖数据库的 [`Repository`] 实现，用于本地运行和测试。

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::core::repository::{Entity, Repository, RepositoryError};

struct MemoryState<T> {
    rows: BTreeMap<i32, T>,
    /// `None` 表示 id 已用尽
    next_id: Option<i32>,
}

pub struct MemoryRepository<T> {
    state: Mutex<MemoryState<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }

    /// 用已有 id 的实体预填充；之后分配的 id 从最大 id 之后开始
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let rows: BTreeMap<i32, T> = entities.into_iter().map(|e| (e.id(), e)).collect();
        let next_id = match rows.keys().next_back() {
            Some(max) => max.checked_add(1).map(|id| id.max(1)),
            None => Some(1),
        };

        Self {
            state: Mutex::new(MemoryState { rows, next_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState<T>>, RepositoryError> {
        self.state.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.get(&id).cloned())
    }

    async fn create(&self, entity: T) -> Result<T, RepositoryError> {
        let mut state = self.lock()?;
        let id = state
            .next_id
            .ok_or(RepositoryError::IdsExhausted { table: T::TABLE })?;
        state.next_id = id.checked_add(1);

        let entity = entity.with_id(id);
        state.rows.insert(id, entity.clone());
        info!(table = T::TABLE, id, "entity created");

        Ok(entity)
    }

    async fn update(&self, entity: &T) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        match state.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                info!(table = T::TABLE, id = entity.id(), "entity updated");
            }
            None => debug!(table = T::TABLE, id = entity.id(), "update matched no row"),
        }

        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.rows.remove(&entity.id()).is_some() {
            info!(table = T::TABLE, id = entity.id(), "entity deleted");
        }

        Ok(())
    }
}
