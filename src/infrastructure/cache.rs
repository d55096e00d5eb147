//! 缓存基础设施（Redis）
//!
//! 进程内只创建一个 `CacheManager`，启动时连接，由调用方持有并在退出前关闭。

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use super::redact::redact_url;
use crate::app::catalog::{CatalogCache, ProductView};
use crate::core::error::StoreError;

/// 精选商品缓存键
pub const FEATURED_PRODUCTS_KEY: &str = "featured_products";

#[derive(Clone)]
pub struct CacheManager {
    connection: ConnectionManager,
    target: String,
    featured_ttl_seconds: u64,
}

impl CacheManager {
    pub async fn connect(url: &str, featured_ttl_seconds: u64) -> Result<Self, StoreError> {
        let target = redact_url(url);

        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Connection(format!("{}: {}", target, e)))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("{}: {}", target, e)))?;

        info!(target_cache = %target, "Redis 已连接");

        Ok(Self {
            connection,
            target,
            featured_ttl_seconds,
        })
    }

    /// 原始连接句柄，可使用完整的 Redis 命令集
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut con = self.connection();
        let raw: Option<String> = con
            .get(key)
            .await
            .map_err(|e| StoreError::operation("cache get", e))?;

        match raw {
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(|e| StoreError::operation("cache decode", e)),
            None => Ok(None),
        }
    }

    /// `ttl_seconds` 为 0 时不设置过期时间
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string(value).map_err(|e| StoreError::operation("cache encode", e))?;
        let mut con = self.connection();

        let result: redis::RedisResult<()> = if ttl_seconds == 0 {
            con.set(key, payload).await
        } else {
            con.set_ex(key, payload, ttl_seconds).await
        };
        result.map_err(|e| StoreError::operation("cache set", e))
    }

    pub async fn invalidate(&self, key: &str) -> Result<(), StoreError> {
        let mut con = self.connection();
        let result: redis::RedisResult<()> = con.del(key).await;
        result.map_err(|e| StoreError::operation("cache del", e))
    }

    /// 释放连接。`ConnectionManager` 的所有克隆都丢弃后底层连接关闭。
    pub fn close(self) {
        info!(target_cache = %self.target, "Redis 连接已释放");
    }
}

#[async_trait]
impl CatalogCache for CacheManager {
    async fn get_featured(&self) -> Result<Option<Vec<ProductView>>, StoreError> {
        self.get_json(FEATURED_PRODUCTS_KEY).await
    }

    async fn put_featured(&self, products: &[ProductView]) -> Result<(), StoreError> {
        self.set_json(FEATURED_PRODUCTS_KEY, products, self.featured_ttl_seconds)
            .await
    }

    async fn invalidate_featured(&self) -> Result<(), StoreError> {
        self.invalidate(FEATURED_PRODUCTS_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = CacheManager::connect("definitely not redis", 60).await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    // 以下测试需要可用的 Redis：UPSTASH_REDIS_URL=... cargo test -- --ignored

    async fn live_cache() -> Option<CacheManager> {
        let url = std::env::var("UPSTASH_REDIS_URL").ok()?;
        Some(CacheManager::connect(&url, 60).await.unwrap())
    }

    async fn key_ttl(cache: &CacheManager, key: &str) -> i64 {
        let mut con = cache.connection();
        con.ttl(key).await.unwrap()
    }

    #[tokio::test]
    #[ignore]
    async fn test_json_roundtrip_with_ttl() {
        let Some(cache) = live_cache().await else {
            return;
        };
        let key = "stepone:test:json_ttl";

        cache.set_json(key, &vec![1, 2, 3], 120).await.unwrap();
        let value: Option<Vec<i32>> = cache.get_json(key).await.unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));

        let ttl = key_ttl(&cache, key).await;
        assert!(ttl > 0 && ttl <= 120);

        cache.invalidate(key).await.unwrap();
        let gone: Option<Vec<i32>> = cache.get_json(key).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    #[ignore]
    async fn test_zero_ttl_never_expires() {
        let Some(cache) = live_cache().await else {
            return;
        };
        let key = "stepone:test:json_no_ttl";

        cache.set_json(key, "featured", 0).await.unwrap();
        assert_eq!(key_ttl(&cache, key).await, -1);

        cache.invalidate(key).await.unwrap();
        assert_eq!(key_ttl(&cache, key).await, -2);
    }

    #[tokio::test]
    #[ignore]
    async fn test_undecodable_value_is_operation_error() {
        let Some(cache) = live_cache().await else {
            return;
        };
        let key = "stepone:test:not_json";

        let mut con = cache.connection();
        let _: () = con.set(key, "not json").await.unwrap();

        let result: Result<Option<Vec<i32>>, _> = cache.get_json(key).await;
        assert!(matches!(result, Err(StoreError::Operation { .. })));

        cache.invalidate(key).await.unwrap();
    }
}
