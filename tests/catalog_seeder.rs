use std::sync::Arc;

use async_trait::async_trait;
use stepone::app::catalog::fixture::{parse_products, reference_products};
use stepone::app::catalog::{Product, ProductFilter, ProductStore};
use stepone::app::seeder::{load_fixture, CatalogSeeder, SeedReport};
use stepone::infrastructure::memory_store::MemoryProductStore;
use stepone::{Config, SeedError, StoreError};

fn stale_products() -> Vec<Product> {
    vec![Product {
        id: None,
        name: "Discontinued Runner".to_string(),
        description: "Old stock".to_string(),
        price: 1999,
        image: "https://example.com/old.jpg".to_string(),
        category: "clearance".to_string(),
        is_featured: true,
    }]
}

fn catalog_key(products: &[Product]) -> Vec<(String, i64, String, bool)> {
    let mut key: Vec<_> = products
        .iter()
        .map(|p| (p.name.clone(), p.price, p.category.clone(), p.is_featured))
        .collect();
    key.sort();
    key
}

/// 删除成功、插入失败的存储
struct FailingInsertStore {
    inner: MemoryProductStore,
}

#[async_trait]
impl ProductStore for FailingInsertStore {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.inner.delete_all().await
    }

    async fn insert_many(&self, _products: &[Product]) -> Result<usize, StoreError> {
        Err(StoreError::operation("insert", "write concern timeout"))
    }

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        self.inner.find(filter).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.inner.count().await
    }
}

/// 无法连接的存储
struct UnreachableStore;

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }

    async fn insert_many(&self, _products: &[Product]) -> Result<usize, StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }

    async fn find(&self, _filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::Connection("server selection timeout".to_string()))
    }
}

#[tokio::test]
async fn test_seed_replaces_existing_catalog() {
    let store = Arc::new(MemoryProductStore::with_products(stale_products()));
    let seeder = CatalogSeeder::new(store.clone(), reference_products().unwrap());

    let report = seeder.run().await.unwrap();

    assert_eq!(report, SeedReport { removed: 1, inserted: 10 });
    let catalog = store.snapshot();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog_key(&catalog), catalog_key(&reference_products().unwrap()));
    assert!(catalog.iter().all(|p| p.name != "Discontinued Runner"));
}

#[tokio::test]
async fn test_seed_reference_scenario() {
    let store = Arc::new(MemoryProductStore::new());
    CatalogSeeder::new(store.clone(), reference_products().unwrap())
        .run()
        .await
        .unwrap();

    let catalog = store.snapshot();
    assert_eq!(store.count().await.unwrap(), 10);

    let first = &catalog[0];
    assert_eq!(first.name, "Nike Air Max 270");
    assert_eq!(first.price, 8999);
    assert_eq!(first.category, "shoes");
    assert!(first.is_featured);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let store = Arc::new(MemoryProductStore::new());
    let seeder = CatalogSeeder::new(store.clone(), reference_products().unwrap());

    seeder.run().await.unwrap();
    let once = catalog_key(&store.snapshot());

    let second = seeder.run().await.unwrap();
    let twice = catalog_key(&store.snapshot());

    assert_eq!(second, SeedReport { removed: 10, inserted: 10 });
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_insert_failure_leaves_catalog_empty() {
    let store = Arc::new(FailingInsertStore {
        inner: MemoryProductStore::with_products(reference_products().unwrap()),
    });
    let seeder = CatalogSeeder::new(store.clone(), reference_products().unwrap());

    let result = seeder.run().await;

    assert!(matches!(
        result,
        Err(SeedError::Store(StoreError::Operation { operation: "insert", .. }))
    ));
    // 删除与插入之间没有事务，失败后目录为空
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_connection_failure_is_reported() {
    let seeder = CatalogSeeder::new(Arc::new(UnreachableStore), reference_products().unwrap());
    let result = seeder.run().await;
    assert!(matches!(result, Err(SeedError::Store(StoreError::Connection(_)))));
}

#[tokio::test]
async fn test_invalid_fixture_never_reaches_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, r#"[{"name":"","price":1,"image":"https://e.com/a.jpg","category":"shoes"}]"#)
        .unwrap();

    let mut config = Config::default();
    config.seed.fixture_path = Some(path);
    // 未配置 database.uri：若校验没有先失败，这里会得到配置错误而不是数据错误
    let result = stepone::app::seeder::run_with_config(&config).await;

    assert!(matches!(result, Err(SeedError::Fixture(_))));
}

#[tokio::test]
async fn test_missing_database_uri_is_a_config_error() {
    let result = stepone::app::seeder::run_with_config(&Config::default()).await;
    assert!(matches!(result, Err(SeedError::Config(_))));
}

#[test]
fn test_load_fixture_prefers_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(
        &path,
        r#"[{"name":"Trail Cap","price":1299,"image":"https://e.com/cap.jpg","category":"apparel"}]"#,
    )
    .unwrap();

    let mut config = Config::default();
    assert_eq!(load_fixture(&config).unwrap().len(), 10);

    config.seed.fixture_path = Some(path);
    let products = load_fixture(&config).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, "apparel");
    assert!(parse_products("[]").is_err());
}
