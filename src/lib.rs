//! # StepOne Shoes 商城后端
//!
//! 分层结构：
//! - `app`: 业务层（商品目录、目录种子任务、订单确认邮件）
//! - `core`: 核心层（错误、响应结构、中间件、存储/邮件端口）
//! - `infrastructure`: 基础设施层（配置、日志、MongoDB、Redis、SMTP）

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::core::error::{ConfigError, CoreError, MailError, SeedError, StoreError};
pub use crate::infrastructure::config::Config;
