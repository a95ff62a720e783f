//! Known/unknown address registry.
//!
//! Owns both address sets and their backing files. All check-then-append
//! sequences run under one registry-wide lock.

mod address_registry;

pub use address_registry::{AddressRegistry, RecordOutcome};
