//! Value objects - Immutable objects defined by their attributes

mod assistant;
mod ids;

pub use assistant::{AssistantName, AssistantToken};
pub use ids::*;
