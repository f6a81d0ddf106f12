//! Signup Service - Waitlist recording
//!
//! The insert is the primary operation and its failure is reported. The
//! welcome email that follows is best effort.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::application::dto::{generation::non_blank, SignupRequest};
use crate::application::ports::outbound::{RepositoryError, WaitlistRepositoryPort};
use crate::application::services::notification_service::{EmailTemplate, NotificationService};
use crate::domain::entities::{WaitlistEntry, WaitlistRole};

const MAX_FIELD_LENGTH: usize = 255;
const MAX_MESSAGE_LENGTH: usize = 5000;

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Failed to record signup: {0}")]
    Storage(#[from] RepositoryError),
}

pub struct SignupService {
    repository: Arc<dyn WaitlistRepositoryPort>,
    notifications: Arc<NotificationService>,
}

impl SignupService {
    pub fn new(
        repository: Arc<dyn WaitlistRepositoryPort>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Validate a signup request into an entry
    fn validate(request: &SignupRequest) -> Result<WaitlistEntry, SignupError> {
        let (name, email, role) = match (
            non_blank(&request.name),
            non_blank(&request.email),
            non_blank(&request.role),
        ) {
            (Some(name), Some(email), Some(role)) => (name, email, role),
            _ => {
                return Err(SignupError::InvalidInput(
                    "Name, email and role are required".to_string(),
                ))
            }
        };

        if name.len() > MAX_FIELD_LENGTH || email.len() > MAX_FIELD_LENGTH {
            return Err(SignupError::InvalidInput(format!(
                "Name and email cannot exceed {} characters",
                MAX_FIELD_LENGTH
            )));
        }
        if !is_plausible_email(email) {
            return Err(SignupError::InvalidInput("Invalid email address".to_string()));
        }
        let role: WaitlistRole = role.parse().map_err(|_| {
            SignupError::InvalidInput(
                "Role must be one of learner, parent, school, partner, other".to_string(),
            )
        })?;

        let message = non_blank(&request.message).map(String::from);
        if message.as_ref().is_some_and(|m| m.len() > MAX_MESSAGE_LENGTH) {
            return Err(SignupError::InvalidInput(format!(
                "Message cannot exceed {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        Ok(WaitlistEntry::new(name, email, role, message))
    }

    #[instrument(skip_all)]
    pub async fn record_signup(&self, request: SignupRequest) -> Result<WaitlistEntry, SignupError> {
        let entry = Self::validate(&request)?;

        self.repository.insert(&entry).await.map_err(|e| {
            error!(error = %e, "Failed to insert waitlist entry");
            SignupError::from(e)
        })?;
        info!(signup_id = %entry.id, role = %entry.role, "Waitlist signup recorded");

        let notifications = self.notifications.clone();
        let template = EmailTemplate::Welcome {
            to: entry.email.clone(),
            name: entry.name.clone(),
            role: Some(entry.role),
        };
        let signup_id = entry.id;
        tokio::spawn(async move {
            if let Err(e) = notifications.send(template).await {
                warn!(signup_id = %signup_id, error = %e, "Welcome email sending failed");
            }
        });

        Ok(entry)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{settle, MockEmailSender, MockRepository};

    fn request(name: &str, email: &str, role: &str) -> SignupRequest {
        SignupRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            role: Some(role.to_string()),
            message: None,
        }
    }

    fn signup_service(
        repository: Arc<MockRepository>,
        sender: Arc<MockEmailSender>,
    ) -> SignupService {
        let notifications = Arc::new(NotificationService::new(sender, "from@example.com"));
        SignupService::new(repository, notifications)
    }

    #[test]
    fn test_validation() {
        assert!(SignupService::validate(&request("Ada", "ada@example.com", "parent")).is_ok());
        assert!(SignupService::validate(&request("", "ada@example.com", "parent")).is_err());
        assert!(SignupService::validate(&request("Ada", "not-an-email", "parent")).is_err());
        assert!(SignupService::validate(&request("Ada", "ada@example.com", "teacher")).is_err());
        assert!(SignupService::validate(&request("x".repeat(256).as_str(), "a@b.co", "other")).is_err());
        assert!(SignupService::validate(&SignupRequest::default()).is_err());
    }

    #[tokio::test]
    async fn test_signup_is_stored_and_welcomed() {
        let repository = Arc::new(MockRepository::default());
        let sender = MockEmailSender::ok();
        let service = signup_service(repository.clone(), sender.clone());

        let mut req = request("Ada", "ada@example.com", "school");
        req.message = Some("We run a coding club".to_string());
        let entry = service.record_signup(req).await.unwrap();
        settle().await;

        assert_eq!(entry.role, WaitlistRole::School);
        let entries = repository.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message.as_deref(), Some("We run a coding club"));

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");
        assert!(sent[0].html.contains("Okul / Eğitimci"));
    }

    #[tokio::test]
    async fn test_resubmission_creates_second_record() {
        let repository = Arc::new(MockRepository::default());
        let service = signup_service(repository.clone(), MockEmailSender::ok());

        let first = service
            .record_signup(request("Ada", "ada@example.com", "parent"))
            .await
            .unwrap();
        let second = service
            .record_signup(request("Ada", "ada@example.com", "parent"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repository.entries.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_storage_failure_is_surfaced_and_no_email_sent() {
        let sender = MockEmailSender::ok();
        let service = signup_service(MockRepository::failing(), sender.clone());

        let err = service
            .record_signup(request("Ada", "ada@example.com", "parent"))
            .await
            .unwrap_err();
        settle().await;

        assert!(matches!(err, SignupError::Storage(_)));
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_email_failure_does_not_invalidate_signup() {
        let repository = Arc::new(MockRepository::default());
        let sender = MockEmailSender::failing();
        let service = signup_service(repository.clone(), sender.clone());

        let result = service
            .record_signup(request("Ada", "ada@example.com", "learner"))
            .await;
        settle().await;

        assert!(result.is_ok());
        assert_eq!(sender.sent_count(), 1);
        assert_eq!(repository.entries.lock().unwrap().len(), 1);
    }
}
