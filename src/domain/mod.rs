//! Domain models for MAC monitoring.
//!
//! This module contains the core domain types that are independent
//! of any infrastructure concerns.

mod events;
mod frame;
mod mac;

pub use events::{AddressList, ClassificationEvent};
pub use frame::{ArpInfo, ArpOperation, Frame, LinkHeader};
pub use mac::MacAddress;
