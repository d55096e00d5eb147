//! 基础设施层

pub mod cache;
pub mod config;
pub mod database;
pub mod logger;
pub mod mailer;
pub mod memory_store;
pub mod redact;
