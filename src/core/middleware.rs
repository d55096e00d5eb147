//! 核心中间件模块

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use super::error::CoreError;

/// 请求日志中间件
///
/// 只记录路径，不记录查询串。5xx 响应以 warn 级别记录，其余为 info。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_ms, "请求失败");
    } else {
        info!(%method, %path, status = status.as_u16(), elapsed_ms, "请求完成");
    }

    response
}

/// 将 `TimeoutLayer` 返回的空 408 响应改写为统一错误结构
pub async fn timeout_response_mapper(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        warn!("请求处理超时");
        return CoreError::RequestTimeout("请求处理超时".to_string()).into_response();
    }
    response
}
