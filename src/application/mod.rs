//! Application layer - Use cases and the ports they depend on
//!
//! This layer contains:
//! - DTOs: request/response shapes at the HTTP boundary
//! - Ports: traits for hosted models, email, datastores and credentials
//! - Services: the generation pipelines, notifications, signups, tokens

pub mod dto;
pub mod ports;
pub mod services;
