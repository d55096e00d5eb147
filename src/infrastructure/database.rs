//! 数据库基础设施（MongoDB）

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client, Collection, Database,
};

use super::redact::redact_url;
use crate::app::catalog::{Product, ProductFilter, ProductStore};
use crate::core::error::StoreError;

/// 商品集合名称
pub const PRODUCTS_COLLECTION: &str = "products";

/// 文档库连接，启动时创建、退出前关闭
pub struct DatabaseManager {
    client: Client,
    database: Database,
    target: String,
}

impl DatabaseManager {
    /// 建立连接并执行一次 `ping`，连接串无效或服务不可达时返回 `StoreError::Connection`
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let target = redact_url(uri);

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Connection(format!("{}: {}", target, e)))?;
        options.app_name = Some("stepone-store".to_string());

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Connection(format!("{}: {}", target, e)))?;
        let database = client.database(database_name);

        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::Connection(format!("{}: {}", target, e)))?;

        Ok(Self {
            client,
            database,
            target,
        })
    }

    pub fn products(&self) -> Collection<Product> {
        self.database.collection(PRODUCTS_COLLECTION)
    }

    /// 脱敏后的连接目标，可直接写入日志
    pub fn redacted_target(&self) -> &str {
        &self.target
    }

    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

/// MongoDB 商品存储
#[derive(Clone)]
pub struct MongoProductStore {
    collection: Collection<Product>,
}

impl MongoProductStore {
    pub fn new(database: &DatabaseManager) -> Self {
        Self {
            collection: database.products(),
        }
    }
}

fn filter_document(filter: &ProductFilter) -> Document {
    match filter {
        ProductFilter::All => doc! {},
        ProductFilter::Featured => doc! { "isFeatured": true },
        ProductFilter::Category(category) => doc! { "category": category.as_str() },
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| StoreError::operation("delete", e))?;
        Ok(result.deleted_count)
    }

    async fn insert_many(&self, products: &[Product]) -> Result<usize, StoreError> {
        if products.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .insert_many(products, None)
            .await
            .map_err(|e| StoreError::operation("insert", e))?;
        Ok(result.inserted_ids.len())
    }

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let cursor = self
            .collection
            .find(filter_document(filter), None)
            .await
            .map_err(|e| StoreError::operation("find", e))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::operation("find", e))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {}, None)
            .await
            .map_err(|e| StoreError::operation("count", e))
    }
}
