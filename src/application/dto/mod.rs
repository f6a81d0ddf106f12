//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP routes can
//! serialize/deserialize without pulling wire names into the domain model.

pub mod email;
pub mod generation;
pub mod lesson;
pub mod signup;

pub use email::*;
pub use generation::{GenerationRequest, GenerationResult};
pub use lesson::*;
pub use signup::*;
