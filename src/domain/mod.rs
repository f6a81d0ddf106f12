//! Domain layer - Core types with no external dependencies
//!
//! This layer contains:
//! - Entities: WaitlistEntry, GenerationRecord
//! - Value Objects: identifiers, assistant names and tokens

pub mod entities;
pub mod value_objects;
