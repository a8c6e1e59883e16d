//! Domain Entities
//!
//! - ServiceRecord: one billable engagement with a client
//! - ServiceRecordInput: caller-supplied record for create/update

mod service_record;

pub use service_record::*;
