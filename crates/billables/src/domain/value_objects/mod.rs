//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod date_range;
mod paging;
mod record_filter;
mod service_status;

pub use date_range::*;
pub use paging::*;
pub use record_filter::*;
pub use service_status::*;
