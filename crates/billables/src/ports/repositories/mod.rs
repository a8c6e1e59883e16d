//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod service_record_repository;

pub use service_record_repository::*;
