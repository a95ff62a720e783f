//! Error types for skanowl.
//!
//! Each layer has its own error enum. Only path selection and controller
//! refusals reach the caller; everything else is turned into a status line.

use std::path::PathBuf;

use thiserror::Error;

use crate::controller::SessionKind;

/// Errors from the address registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while decoding a frame.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Packet too short: expected at least {expected} bytes, got {actual}")]
    PacketTooShort { expected: usize, actual: usize },
}

/// Errors that can occur during packet capture.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Network interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Failed to create capture channel: {0}")]
    ChannelCreation(String),

    #[error("Insufficient permissions for packet capture (try running as root or with CAP_NET_RAW)")]
    InsufficientPermissions,

    #[error("Capture read failed: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors returned by the task controller.
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("{0} session already running")]
    SessionActive(SessionKind),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to spawn capture worker: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Errors while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
