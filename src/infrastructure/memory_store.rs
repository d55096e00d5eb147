//! 内存商品存储，用于测试与无数据库的本地开发

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::app::catalog::{Product, ProductFilter, ProductStore};
use crate::core::error::StoreError;

#[derive(Default)]
pub struct MemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.products.lock() {
            guard.extend(products.into_iter().map(assign_id));
        }
        store
    }

    /// 当前内容快照
    pub fn snapshot(&self) -> Vec<Product> {
        self.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Product>>, StoreError> {
        self.products
            .lock()
            .map_err(|_| StoreError::Connection("内存存储锁已损坏".to_string()))
    }
}

fn assign_id(mut product: Product) -> Product {
    if product.id.is_none() {
        product.id = Some(ObjectId::new());
    }
    product
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut guard = self.lock()?;
        let removed = guard.len() as u64;
        guard.clear();
        Ok(removed)
    }

    async fn insert_many(&self, products: &[Product]) -> Result<usize, StoreError> {
        let mut guard = self.lock()?;
        guard.extend(products.iter().cloned().map(assign_id));
        Ok(products.len())
    }

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.len() as u64)
    }
}
