use async_trait::async_trait;

/// A fully rendered message ready for the delivery vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EmailSenderError {
    #[error("Email credential is not configured")]
    NotConfigured,
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Email API returned status {status}: {body}")]
    Api { status: u16, body: String },
}

#[async_trait]
pub trait EmailSenderPort: Send + Sync {
    /// Send once and return the vendor's message id
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailSenderError>;
}
