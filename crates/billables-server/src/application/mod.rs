//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and the clock.

mod service_record_service;

pub use service_record_service::ServiceRecordService;
