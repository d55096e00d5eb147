//! 订单确认邮件发送
//!
//! 不重试、不排队、不跟踪投递结果。发送失败时错误原样返回给调用方，
//! 是否因此回滚或标记订单由下单逻辑决定。

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{address::AddressError, message::Mailbox, Address};
use tracing::info;

use super::email::render_confirmation;
use super::model::Order;
use crate::core::error::MailError;
use crate::infrastructure::config::MailConfig;
use crate::infrastructure::mailer::SmtpMailer;

/// 待发送的 HTML 邮件，地址已解析
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub html: String,
}

/// 邮件发送端口
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

pub struct OrderNotifier {
    mailer: Arc<dyn Mailer>,
    sender: Mailbox,
    currency_symbol: String,
}

impl OrderNotifier {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        sender: Mailbox,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            sender,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// 使用配置中的 SMTP 账号构建通知器，发件人为 `"<from_name>" <username>`
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let mailer = SmtpMailer::from_config(config)?;
        let sender = sender_mailbox(config)?;
        Ok(Self::new(
            Arc::new(mailer),
            sender,
            config.currency_symbol.clone(),
        ))
    }

    /// 发送订单确认邮件。收件地址无效时在发送前返回错误。
    pub async fn send_order_email(&self, to: &str, order: &Order) -> Result<(), MailError> {
        let recipient = parse_mailbox(to)?;
        let rendered = render_confirmation(order, &self.currency_symbol);

        self.mailer
            .send(OutgoingEmail {
                from: self.sender.clone(),
                to: recipient,
                subject: rendered.subject,
                html: rendered.html,
            })
            .await?;

        info!(order_id = %order.id, lines = order.products.len(), "订单确认邮件已发送");
        Ok(())
    }
}

pub fn sender_mailbox(config: &MailConfig) -> Result<Mailbox, MailError> {
    let (username, _) = config
        .require_credentials()
        .map_err(|e| MailError::Connection(e.to_string()))?;
    let address: Address = username.parse().map_err(|e: AddressError| MailError::Address {
        address: username.to_string(),
        message: e.to_string(),
    })?;
    Ok(Mailbox::new(Some(config.from_name.clone()), address))
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, MailError> {
    raw.trim().parse().map_err(|e: AddressError| MailError::Address {
        address: raw.to_string(),
        message: e.to_string(),
    })
}
