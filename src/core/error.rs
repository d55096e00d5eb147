//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 存储错误（文档库与缓存共用）
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 服务不可达或认证被拒绝
    #[error("连接失败: {0}")]
    Connection(String),
    /// 连接建立后操作失败
    #[error("{operation} 操作失败: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn operation(operation: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Operation {
            operation,
            message: err.to_string(),
        }
    }
}

/// 邮件发送错误
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP 传输不可用: {0}")]
    Connection(String),
    #[error("无效的邮件地址 {address:?}: {message}")]
    Address { address: String, message: String },
    #[error("邮件发送失败: {0}")]
    Operation(String),
}

/// 目录种子任务错误
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("商品数据文件无效: {0}")]
    Fixture(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
    #[error("缺少必需的配置项: {0}")]
    Missing(&'static str),
}

/// HTTP 层错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    RequestTimeout(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "商品存储访问失败");
        CoreError::InternalServerError("商品目录暂时不可用".to_string())
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::RequestTimeout(msg) => {
                (StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT", msg)
            }
            CoreError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                msg,
            ),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}
