//! Capture session lifecycle.
//!
//! The controller owns the running session (its workers and cancellation
//! signal) and is the only component front ends talk to.

mod task_controller;

pub use task_controller::{ControllerState, SessionKind, TaskController};
