//! Outbound ports - Interfaces that the application requires from external systems

mod credential_port;
mod email_port;
mod model_gateway_port;
mod repository_port;

pub use credential_port::{CredentialKey, CredentialSource};
pub use email_port::{EmailSenderError, EmailSenderPort, OutgoingEmail};
pub use model_gateway_port::{ModelGatewayError, ModelGatewayPort};
pub use repository_port::{
    GenerationRecordRepositoryPort, RepositoryError, WaitlistRepositoryPort,
};
