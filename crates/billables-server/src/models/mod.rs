//! Billables Data Models
//!
//! Request/response DTOs for the HTTP layer.

mod service_record;

pub use service_record::*;
