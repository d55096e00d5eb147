//! 商品目录处理器

use std::time::Duration;

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{model::ProductView, service::CatalogService};
use crate::core::{
    error::CoreError,
    middleware::{request_logging_middleware, timeout_response_mapper},
    response::ApiResponse,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
}

/// 完整的服务路由：超时、请求日志、追踪、CORS
///
/// 超时响应经 `timeout_response_mapper` 改写后才进入请求日志。
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    routes(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_response_mapper))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 目录路由（不含中间件）
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(list_products))
        .route("/api/products/featured", get(list_featured))
        .route("/api/products/category/:category", get(list_by_category))
        .fallback(not_found)
        .with_state(state)
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, CoreError> {
    let products = state.catalog_service.list_products().await?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn list_featured(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, CoreError> {
    let products = state.catalog_service.list_featured().await?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, CoreError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(CoreError::BadRequest("分类不能为空".to_string()));
    }
    let products = state.catalog_service.list_by_category(category).await?;
    Ok(Json(ApiResponse::list(products)))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> CoreError {
    CoreError::NotFound("资源不存在".to_string())
}
