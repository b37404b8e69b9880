//! 测试替身：记录调用次数的仓储

#![allow(dead_code)]

use async_trait::async_trait;
use product_catalog::app::product::model::{sample_products, Product};
use product_catalog::core::repository::{Repository, RepositoryError};
use product_catalog::infrastructure::memory_repository::MemoryRepository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct Calls {
    pub get_all: AtomicUsize,
    pub get_by_id: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

/// 包装内存仓储，记录每个操作的调用次数和最后一次写入的实体
pub struct RecordingRepository {
    inner: MemoryRepository<Product>,
    pub calls: Calls,
    last_created: Mutex<Option<Product>>,
    last_updated: Mutex<Option<Product>>,
    last_deleted: Mutex<Option<Product>>,
}

impl RecordingRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            inner: MemoryRepository::with_entities(products),
            calls: Calls::default(),
            last_created: Mutex::new(None),
            last_updated: Mutex::new(None),
            last_deleted: Mutex::new(None),
        }
    }

    pub fn seeded() -> Self {
        Self::new(sample_products())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn last_created(&self) -> Option<Product> {
        self.last_created.lock().unwrap().clone()
    }

    pub fn last_updated(&self) -> Option<Product> {
        self.last_updated.lock().unwrap().clone()
    }

    pub fn last_deleted(&self) -> Option<Product> {
        self.last_deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Repository<Product> for RecordingRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.calls.get_all.fetch_add(1, Ordering::SeqCst);
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        self.calls.get_by_id.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(id).await
    }

    async fn create(&self, entity: Product) -> Result<Product, RepositoryError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        *self.last_created.lock().unwrap() = Some(entity.clone());
        self.inner.create(entity).await
    }

    async fn update(&self, entity: &Product) -> Result<(), RepositoryError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        *self.last_updated.lock().unwrap() = Some(entity.clone());
        self.inner.update(entity).await
    }

    async fn delete(&self, entity: &Product) -> Result<(), RepositoryError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        *self.last_deleted.lock().unwrap() = Some(entity.clone());
        self.inner.delete(entity).await
    }
}

/// 所有操作都失败的仓储，模拟存储不可用
pub struct FailingRepository;

#[async_trait]
impl Repository<Product> for FailingRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Err(RepositoryError::LockPoisoned)
    }

    async fn get_by_id(&self, _id: i32) -> Result<Option<Product>, RepositoryError> {
        Err(RepositoryError::LockPoisoned)
    }

    async fn create(&self, _entity: Product) -> Result<Product, RepositoryError> {
        Err(RepositoryError::LockPoisoned)
    }

    async fn update(&self, _entity: &Product) -> Result<(), RepositoryError> {
        Err(RepositoryError::LockPoisoned)
    }

    async fn delete(&self, _entity: &Product) -> Result<(), RepositoryError> {
        Err(RepositoryError::LockPoisoned)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::LockPoisoned)
    }
}
