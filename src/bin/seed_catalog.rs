//! 商品目录种子任务
//!
//! 删除全部商品并写入参考列表。成功退出码 0，任何错误退出码 1。

use std::process::ExitCode;

use tracing::{error, info, warn};

use stepone::app::catalog::CatalogCache;
use stepone::app::seeder::run_with_config;
use stepone::infrastructure::{cache::CacheManager, config::load_config, logger::Logger};
use stepone::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("配置加载失败: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match Logger::init(&config.logging) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("日志初始化失败: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run_with_config(&config).await {
        Ok(report) => {
            info!(
                removed = report.removed,
                inserted = report.inserted,
                "商品目录种子任务完成"
            );
            invalidate_featured_cache(&config).await;
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "商品目录种子任务失败");
            ExitCode::FAILURE
        }
    }
}

/// 目录已替换，旧的精选商品缓存不再有效；失败只记录警告
async fn invalidate_featured_cache(config: &Config) {
    let Ok(url) = config.cache.require_url() else {
        return;
    };

    match CacheManager::connect(url, config.cache.featured_ttl_seconds).await {
        Ok(cache) => {
            if let Err(err) = cache.invalidate_featured().await {
                warn!(error = %err, "清除精选商品缓存失败");
            } else {
                info!("精选商品缓存已清除");
            }
            cache.close();
        }
        Err(err) => warn!(error = %err, "无法连接缓存，跳过缓存清除"),
    }
}
