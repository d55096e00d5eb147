//! 商品目录种子任务
//!
//! 先删除全部商品，再插入参考列表。两步之间没有事务：
//! 删除成功而插入失败时目录为空，读取方在运行期间也可能看到空目录。

use std::sync::Arc;

use tracing::{error, info};

use crate::app::catalog::{fixture, Product, ProductStore};
use crate::core::error::SeedError;
use crate::infrastructure::config::Config;
use crate::infrastructure::database::{DatabaseManager, MongoProductStore};

/// 一次种子运行的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub removed: u64,
    pub inserted: usize,
}

pub struct CatalogSeeder {
    store: Arc<dyn ProductStore>,
    products: Vec<Product>,
}

impl CatalogSeeder {
    /// `products` 需已通过 `fixture` 模块校验
    pub fn new(store: Arc<dyn ProductStore>, products: Vec<Product>) -> Self {
        Self { store, products }
    }

    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        let removed = self.store.delete_all().await.map_err(|err| {
            error!(error = %err, "删除旧商品失败");
            err
        })?;
        info!(removed, "旧商品已删除");

        let inserted = self.store.insert_many(&self.products).await.map_err(|err| {
            error!(error = %err, "插入商品失败，目录当前为空");
            err
        })?;
        info!(inserted, "商品种子写入完成");

        Ok(SeedReport { removed, inserted })
    }
}

/// 按配置加载商品列表：优先 `seed.fixture_path`，否则使用内置列表
pub fn load_fixture(config: &Config) -> Result<Vec<Product>, SeedError> {
    match &config.seed.fixture_path {
        Some(path) => {
            info!(path = %path.display(), "从文件加载商品列表");
            fixture::load_products(path)
        }
        None => fixture::reference_products(),
    }
}

/// 完整的种子流程：加载并校验商品列表、连接数据库、替换目录、关闭连接
///
/// 商品列表无效时直接返回，不会触碰数据库。
pub async fn run_with_config(config: &Config) -> Result<SeedReport, SeedError> {
    let products = load_fixture(config)?;

    let uri = config.database.require_uri()?;
    let database = DatabaseManager::connect(uri, &config.database.name).await?;
    info!(target_db = %database.redacted_target(), "MongoDB 已连接");

    let store = Arc::new(MongoProductStore::new(&database));
    let result = CatalogSeeder::new(store, products).run().await;

    database.close().await;
    result
}
