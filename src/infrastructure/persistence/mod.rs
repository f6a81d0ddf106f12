//! Persistence adapters
//!
//! Signups and generation records go to Supabase over its REST interface,
//! or to a local SQLite file when no Supabase project is configured.

mod sqlite_repository;
mod supabase_repository;

pub use sqlite_repository::SqliteRepository;
pub use supabase_repository::SupabaseRepository;
