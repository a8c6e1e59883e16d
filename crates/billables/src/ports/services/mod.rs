//! Service Ports
//!
//! Abstract interfaces for ambient services the domain depends on.

mod clock;

pub use clock::*;
