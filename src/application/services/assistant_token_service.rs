//! Assistant Token Service - Public voice SDK key lookup
//!
//! A pure lookup against configuration, resolved on every call.

use std::sync::Arc;

use tracing::error;

use crate::application::ports::outbound::{CredentialKey, CredentialSource};
use crate::domain::value_objects::{AssistantName, AssistantToken};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid assistant. Use 'steve' or 'albert'.")]
    InvalidAssistant,
    #[error("Voice assistant public key is not configured")]
    PublicKeyMissing,
    #[error("Assistant ID for \"{0}\" is not configured")]
    AssistantIdMissing(AssistantName),
}

pub struct AssistantTokenService {
    credentials: Arc<dyn CredentialSource>,
}

impl AssistantTokenService {
    pub fn new(credentials: Arc<dyn CredentialSource>) -> Self {
        Self { credentials }
    }

    pub fn issue_token(&self, assistant: &str) -> Result<AssistantToken, TokenError> {
        let public_key = self
            .credentials
            .get(CredentialKey::VapiPublicKey)
            .ok_or_else(|| {
                error!("VAPI_PUBLIC_KEY not found in environment");
                TokenError::PublicKeyMissing
            })?;

        let name: AssistantName = assistant
            .parse()
            .map_err(|_| TokenError::InvalidAssistant)?;

        let id_key = match name {
            AssistantName::Steve => CredentialKey::VapiAssistantIdSteve,
            AssistantName::Albert => CredentialKey::VapiAssistantIdAlbert,
        };
        let assistant_id = self.credentials.get(id_key).ok_or_else(|| {
            error!(assistant = %name, "{} not found in environment", id_key.env_var());
            TokenError::AssistantIdMissing(name)
        })?;

        Ok(AssistantToken {
            public_key: public_key.trim().to_string(),
            assistant_id: assistant_id.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::all_credentials;

    #[test]
    fn test_issues_trimmed_key() {
        let service = AssistantTokenService::new(Arc::new(all_credentials()));

        let token = service.issue_token("Albert").unwrap();

        assert_eq!(token.public_key, "pk_public");
        assert_eq!(token.assistant_id, "asst-albert");
    }

    #[test]
    fn test_unknown_assistant() {
        let service = AssistantTokenService::new(Arc::new(all_credentials()));

        let err = service.issue_token("dave").unwrap_err();

        assert_eq!(err.to_string(), "Invalid assistant. Use 'steve' or 'albert'.");
    }

    #[test]
    fn test_missing_configuration() {
        let mut credentials = all_credentials();
        credentials.remove(&CredentialKey::VapiAssistantIdSteve);
        let service = AssistantTokenService::new(Arc::new(credentials.clone()));

        let err = service.issue_token("steve").unwrap_err();
        assert!(matches!(err, TokenError::AssistantIdMissing(AssistantName::Steve)));
        assert_eq!(err.to_string(), "Assistant ID for \"steve\" is not configured");
        assert!(service.issue_token("albert").is_ok());

        credentials.insert(CredentialKey::VapiPublicKey, "   ".to_string());
        let service = AssistantTokenService::new(Arc::new(credentials));
        assert!(matches!(
            service.issue_token("albert").unwrap_err(),
            TokenError::PublicKeyMissing
        ));
    }
}
