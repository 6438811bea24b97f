//! Email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send
//! plain-text notifications. If `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be built.

use async_trait::async_trait;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Sender address used when `SMTP_FROM` is not set.
pub const DEFAULT_FROM_ADDRESS: &str = "admin@ecommerce.com";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      |                       |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `admin@ecommerce.com` |
    /// | `SMTP_USER`     | no       |                       |
    /// | `SMTP_PASSWORD` | no       |                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Anything that can send a plain-text email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// Sends email through the configured SMTP relay.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<lettre::Message, EmailError> {
        use lettre::message::header::ContentType;

        lettre::Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for EmailDelivery {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        use lettre::{
            transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport,
            Tokio1Executor,
        };

        let email = self.build_message(to, subject, body)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(to, subject, "Notification email sent");
        Ok(())
    }
}
