//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - fal.ai: Hosted model inference
//! - Resend: Transactional email delivery
//! - Persistence: Supabase and SQLite datastores
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod fal;
pub mod http;
pub mod persistence;
pub mod resend;
pub mod state;
