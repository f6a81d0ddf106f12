//! Ports - Interfaces between the application core and the adapters

pub mod outbound;
