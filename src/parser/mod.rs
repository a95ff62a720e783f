//! Frame decoding module.
//!
//! Turns raw Ethernet bytes into the domain `Frame` view.

mod frame_parser;

pub use frame_parser::FrameParser;
