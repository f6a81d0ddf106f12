//! Application services - Use case implementations
//!
//! Each service accepts its outbound ports as trait objects and runs one
//! straight-line pipeline per request.

pub mod assistant_token_service;
pub mod character_generation_service;
pub mod email_templates;
pub mod lesson_service;
pub mod notification_service;
pub mod prompt_builder;
pub mod response_shape;
pub mod signup_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use assistant_token_service::{AssistantTokenService, TokenError};
pub use character_generation_service::{
    stylizer_for, CharacterGenerationService, CharacterModels, GenerationError, StylizeMode,
};
pub use lesson_service::{LessonError, LessonModels, LessonService};
pub use notification_service::{EmailTemplate, NotificationError, NotificationService};
pub use signup_service::{SignupError, SignupService};
