//! Notification Service - Transactional email delivery
//!
//! Renders one of the fixed templates and hands it to the email vendor once.
//! Validation happens before any vendor call. There are no retries.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::application::dto::{
    generation::non_blank, EmailReceipt, MentorEmailRequest, WelcomeEmailRequest,
};
use crate::application::ports::outbound::{EmailSenderError, EmailSenderPort, OutgoingEmail};
use crate::application::services::email_templates;
use crate::domain::entities::WaitlistRole;

/// A template plus the data it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailTemplate {
    MentorReady {
        to: String,
        child_name: Option<String>,
        original_drawing: Option<String>,
        mentor_image_url: String,
    },
    Welcome {
        to: String,
        name: String,
        role: Option<WaitlistRole>,
    },
}

impl EmailTemplate {
    pub fn mentor_ready(request: MentorEmailRequest) -> Result<Self, NotificationError> {
        match (non_blank(&request.to_email), non_blank(&request.mentor_image_url)) {
            (Some(to), Some(image)) => Ok(Self::MentorReady {
                to: to.to_string(),
                child_name: non_blank(&request.child_name).map(String::from),
                original_drawing: non_blank(&request.original_drawing).map(String::from),
                mentor_image_url: image.to_string(),
            }),
            _ => Err(NotificationError::InvalidInput(
                "Email and mentor image are required".to_string(),
            )),
        }
    }

    /// Unknown roles fall back to a generic label instead of failing
    pub fn welcome(request: WelcomeEmailRequest) -> Result<Self, NotificationError> {
        match (non_blank(&request.to_email), non_blank(&request.name)) {
            (Some(to), Some(name)) => Ok(Self::Welcome {
                to: to.to_string(),
                name: name.to_string(),
                role: non_blank(&request.role).and_then(|r| r.parse().ok()),
            }),
            _ => Err(NotificationError::InvalidInput(
                "Email and name are required".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MentorReady { .. } => "mentor-ready",
            Self::Welcome { .. } => "welcome",
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Self::MentorReady { to, .. } | Self::Welcome { to, .. } => to,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Email service not configured")]
    NotConfigured,
    #[error("Failed to send email: {0}")]
    Delivery(String),
}

impl From<EmailSenderError> for NotificationError {
    fn from(err: EmailSenderError) -> Self {
        match err {
            EmailSenderError::NotConfigured => Self::NotConfigured,
            other => Self::Delivery(other.to_string()),
        }
    }
}

pub struct NotificationService {
    sender: Arc<dyn EmailSenderPort>,
    from_address: String,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn EmailSenderPort>, from_address: impl Into<String>) -> Self {
        Self {
            sender,
            from_address: from_address.into(),
        }
    }

    pub fn render(&self, template: &EmailTemplate) -> OutgoingEmail {
        let (subject, html) = match template {
            EmailTemplate::MentorReady {
                child_name,
                original_drawing,
                mentor_image_url,
                ..
            } => (
                email_templates::mentor_ready_subject(child_name.as_deref()),
                email_templates::render_mentor_ready(
                    child_name.as_deref(),
                    mentor_image_url,
                    original_drawing.as_deref(),
                ),
            ),
            EmailTemplate::Welcome { name, role, .. } => (
                email_templates::welcome_subject(),
                email_templates::render_welcome(name, *role),
            ),
        };

        OutgoingEmail {
            from: self.from_address.clone(),
            to: template.recipient().to_string(),
            subject,
            html,
        }
    }

    #[instrument(skip(self, template), fields(kind = template.kind()))]
    pub async fn send(&self, template: EmailTemplate) -> Result<EmailReceipt, NotificationError> {
        let email = self.render(&template);

        match self.sender.send(&email).await {
            Ok(email_id) => {
                info!(email_id = %email_id, "Email sent");
                Ok(EmailReceipt {
                    success: true,
                    email_id,
                })
            }
            Err(e) => {
                error!(error = %e, "Email delivery failed");
                Err(e.into())
            }
        }
    }
}
