//! Domain Services
//!
//! Stateless business rules that operate on domain entities.

pub mod reconciliation;
