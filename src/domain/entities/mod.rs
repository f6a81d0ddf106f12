//! Domain entities - Core business objects with identity

mod generation_record;
mod waitlist_entry;

pub use generation_record::GenerationRecord;
pub use waitlist_entry::{WaitlistEntry, WaitlistRole};
