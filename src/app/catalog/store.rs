//! 商品存储端口

use async_trait::async_trait;

use super::model::{Product, ProductFilter, ProductView};
use crate::core::error::StoreError;

/// 商品目录存储
///
/// 生产环境由 MongoDB 实现，测试与本地开发使用内存实现。
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 删除全部商品，返回删除数量
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// 批量插入商品，返回插入数量
    async fn insert_many(&self, products: &[Product]) -> Result<usize, StoreError>;

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

/// 目录缓存端口（精选商品）
#[async_trait]
pub trait CatalogCache: Send + Sync {
    async fn get_featured(&self) -> Result<Option<Vec<ProductView>>, StoreError>;

    async fn put_featured(&self, products: &[ProductView]) -> Result<(), StoreError>;

    async fn invalidate_featured(&self) -> Result<(), StoreError>;
}
