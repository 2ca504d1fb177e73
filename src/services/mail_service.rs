use lettre::{
    message::header::ContentType, message::Mailbox,
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Message,
    Tokio1Executor,
};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to build email message: {0}")]
    MessageBuildError(String),

    #[error("Failed to send email: {0}")]
    SendError(String),

    #[error("SMTP configuration error: {0}")]
    ConfigError(String),
}

/// SMTP configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl SmtpConfig {
    /// Load SMTP configuration from environment variables. A missing host
    /// means email delivery is disabled.
    pub fn from_env() -> Result<Self, MailError> {
        let host = env::var("SMTP_HOST")
            .map_err(|_| MailError::ConfigError("SMTP_HOST not set".to_string()))?;

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| MailError::ConfigError("Invalid SMTP_PORT".to_string()))?;

        let username = env::var("SMTP_USERNAME")
            .map_err(|_| MailError::ConfigError("SMTP_USERNAME not set".to_string()))?;

        let password = env::var("SMTP_PASSWORD")
            .map_err(|_| MailError::ConfigError("SMTP_PASSWORD not set".to_string()))?;

        let from_email = env::var("SMTP_FROM_EMAIL")
            .map_err(|_| MailError::ConfigError("SMTP_FROM_EMAIL not set".to_string()))?;

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Larder".to_string());

        Ok(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
        })
    }
}

/// Sends transactional email over SMTP
#[derive(Clone)]
pub struct MailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl MailService {
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::ConfigError(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, config })
    }

    pub async fn send_login_email(&self, to: &str) -> Result<(), MailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| MailError::ConfigError(e.to_string()))?;

        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|e| MailError::MessageBuildError(e.to_string()))?;

        let email = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject("Login Notification - Larder")
            .header(ContentType::TEXT_HTML)
            .body("<p>Welcome! You logged in successfully.</p>".to_string())
            .map_err(|e| MailError::MessageBuildError(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::SendError(e.to_string()))?;

        Ok(())
    }
}
