//! 商品目录 HTTP 服务

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use stepone::app::catalog::{handler, CatalogService};
use stepone::infrastructure::{
    cache::CacheManager,
    config::load_config,
    database::{DatabaseManager, MongoProductStore},
    logger::Logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    match &config.source {
        Some(path) => info!(path = %path.display(), "从配置文件加载"),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let database =
        DatabaseManager::connect(config.database.require_uri()?, &config.database.name).await?;
    info!(target_db = %database.redacted_target(), "MongoDB 已连接");

    let mut catalog_service = CatalogService::new(Arc::new(MongoProductStore::new(&database)));

    let cache = if config.cache.is_configured() {
        let cache =
            CacheManager::connect(config.cache.require_url()?, config.cache.featured_ttl_seconds)
                .await?;
        catalog_service = catalog_service.with_cache(Arc::new(cache.clone()));
        Some(cache)
    } else {
        warn!("未配置 cache.url，精选商品不使用缓存");
        None
    };

    let app = handler::router(
        handler::AppState { catalog_service },
        Duration::from_secs(config.http.timeout_seconds),
    );

    let addr = format!("{}:{}", config.http.bind_address, config.http.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("商品目录服务启动: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("收到停止信号，正在关闭连接...");
    if let Some(cache) = cache {
        cache.close();
    }
    database.close().await;
    info!("服务已安全关闭");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "无法监听 Ctrl+C，服务将持续运行");
        std::future::pending::<()>().await;
    }
}
