//! 手动发送（或重发）订单确认邮件
//!
//! 用法: notify_order --to buyer@example.com order.json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use stepone::app::orders::{Order, OrderNotifier};
use stepone::infrastructure::{config::load_config, logger::Logger};

#[derive(Parser, Debug)]
#[command(author, version, about = "发送订单确认邮件")]
struct Args {
    /// 收件地址
    #[arg(long)]
    to: String,

    /// 订单 JSON 文件（字段：_id, totalAmount, products）
    order: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    let content = fs::read_to_string(&args.order)
        .with_context(|| format!("无法读取订单文件 {}", args.order.display()))?;
    let order: Order = serde_json::from_str(&content).context("订单文件格式无效")?;

    let notifier = OrderNotifier::from_config(&config.mail)?;
    notifier.send_order_email(&args.to, &order).await?;

    info!(order_id = %order.id, "确认邮件发送完成");
    Ok(())
}
