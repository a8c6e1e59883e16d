//! Billables Domain Library
//!
//! Core domain types and interfaces for tracking billable service records
//! and reconciling their status against recorded payments.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: `ServiceRecord` and its caller-supplied input
//!   - `value_objects/`: `ServiceStatus`, date ranges, paging, filters
//!   - `services/`: reconciliation rules for insert/update/cancel/reactivate
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: The clock used to stamp payment dates
//!
//! # Usage
//!
//! ```rust,ignore
//! use billables::domain::services::reconciliation;
//! use billables::{Clock, ServiceRecordInput, ServiceRecordRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DateField, DateRange, DomainError, Page, PageRequest, RecordFilter, ServiceRecord,
    ServiceRecordInput, ServiceStatus, Sort, SortDirection, SortField,
};
pub use ports::{
    // Clock
    Clock,
    FixedClock,
    // Repositories
    ServiceRecordRepository,
    SystemClock,
};
