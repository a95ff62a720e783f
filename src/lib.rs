//! skanowl - MAC address monitor.
//!
//! Classifies source hardware addresses seen on the wire as known or
//! unknown, flags ARP replies and Ethernet/ARP sender mismatches, and runs
//! capture workers under a controller with deterministic start/stop.
//!
//! Data flow per frame: capture → decode → filter → classify → registry
//! update and/or status line.

pub mod capture;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod parser;
pub mod registry;
pub mod reporter;
pub mod shell;
pub mod worker;

pub use capture::{CaptureFactory, CaptureFilter, FrameSource, PnetCapture, PnetCaptureFactory};
pub use config::Config;
pub use controller::{ControllerState, SessionKind, TaskController};
pub use domain::{ClassificationEvent, Frame, MacAddress};
pub use error::{CaptureError, ConfigError, ControllerError, RegistryError};
pub use registry::{AddressRegistry, RecordOutcome};
pub use reporter::{ChannelReporter, ConsoleReporter, EventSink, MemoryReporter};
