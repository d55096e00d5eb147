//! SMTP 邮件发送

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::config::MailConfig;
use crate::app::orders::{Mailer, OutgoingEmail};
use crate::core::error::MailError;

/// 465 端口使用隐式 TLS，其他端口使用 STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// 构建传输层；不会建立连接，连接在首次发送时建立
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let host = config.smtp_host.trim();
        if host.is_empty() {
            return Err(MailError::Connection("mail.smtp_host 为空".to_string()));
        }
        let (username, password) = config
            .require_credentials()
            .map_err(|e| MailError::Connection(e.to_string()))?;

        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| MailError::Connection(format!("{}: {}", host, e)))?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport })
    }
}

pub fn build_message(email: OutgoingEmail) -> Result<Message, MailError> {
    Message::builder()
        .from(email.from)
        .to(email.to)
        .subject(email.subject)
        .header(ContentType::TEXT_HTML)
        .body(email.html)
        .map_err(|e| MailError::Operation(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Operation(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> MailConfig {
        MailConfig {
            username: Some("shop@example.com".to_string()),
            password: Some("app-password".to_string()),
            ..MailConfig::default()
        }
    }

    #[test]
    fn test_builds_transport_from_config() {
        assert!(SmtpMailer::from_config(&configured()).is_ok());

        let mut starttls = configured();
        starttls.smtp_port = 587;
        assert!(SmtpMailer::from_config(&starttls).is_ok());
    }

    #[test]
    fn test_rejects_empty_host() {
        let mut config = configured();
        config.smtp_host = "  ".to_string();
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(MailError::Connection(_))
        ));
    }

    #[test]
    fn test_rejects_missing_password() {
        let mut config = configured();
        config.password = None;
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(MailError::Connection(_))
        ));
    }

    #[test]
    fn test_message_is_html() {
        let email = OutgoingEmail {
            from: "StepOne Shoes <shop@example.com>".parse().unwrap(),
            to: "buyer@example.com".parse().unwrap(),
            subject: "Your Order Confirmation - 1".to_string(),
            html: "<h2>Thank you for your order!</h2>".to_string(),
        };
        let message = build_message(email).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("Subject: Your Order Confirmation - 1"));
    }
}
