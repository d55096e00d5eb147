//! 商品目录业务服务（只读）

use std::sync::Arc;

use tracing::{debug, warn};

use super::model::{ProductFilter, ProductView};
use super::store::{CatalogCache, ProductStore};
use crate::core::error::StoreError;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    cache: Option<Arc<dyn CatalogCache>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store, cache: None }
    }

    pub fn with_cache(mut self, cache: Arc<dyn CatalogCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn list_products(&self) -> Result<Vec<ProductView>, StoreError> {
        self.find(ProductFilter::All).await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<ProductView>, StoreError> {
        self.find(ProductFilter::Category(category.to_string())).await
    }

    /// 精选商品：先查缓存，未命中时查库并回填
    ///
    /// 缓存读写失败只记录日志，不影响返回结果。
    pub async fn list_featured(&self) -> Result<Vec<ProductView>, StoreError> {
        let Some(cache) = &self.cache else {
            return self.find(ProductFilter::Featured).await;
        };

        match cache.get_featured().await {
            Ok(Some(products)) => {
                debug!(count = products.len(), "精选商品缓存命中");
                return Ok(products);
            }
            Ok(None) => debug!("精选商品缓存未命中"),
            Err(err) => warn!(error = %err, "读取精选商品缓存失败，回退到数据库"),
        }

        let products = self.find(ProductFilter::Featured).await?;
        if let Err(err) = cache.put_featured(&products).await {
            warn!(error = %err, "写入精选商品缓存失败");
        }
        Ok(products)
    }

    async fn find(&self, filter: ProductFilter) -> Result<Vec<ProductView>, StoreError> {
        let products = self.store.find(&filter).await?;
        Ok(products.into_iter().map(ProductView::from).collect())
    }
}
