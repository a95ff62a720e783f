//! pnet-based packet capture implementation.

use std::io::ErrorKind;
use std::time::{Duration, Instant};

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, NetworkInterface};
use tracing::debug;

use super::{CaptureFactory, FrameSource};
use crate::domain::Frame;
use crate::error::CaptureError;
use crate::parser::FrameParser;

/// Read timeout of the underlying channel. A poll window is assembled
/// from repeated reads, so a window overshoots by at most this much.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Packet capture using the pnet library.
///
/// The datalink channel is opened on the first poll and reopened after a
/// read failure, so an interface that is missing at start-up is retried
/// every window instead of killing the worker.
pub struct PnetCapture {
    interface: Option<String>,
    label: String,
    parser: FrameParser,
    rx: Option<Box<dyn DataLinkReceiver>>,
}

impl PnetCapture {
    /// Create a capture on the named interface, or on the first suitable
    /// interface when `interface` is `None`.
    pub fn new(interface: Option<&str>) -> Self {
        Self {
            interface: interface.map(str::to_string),
            label: interface.unwrap_or("default").to_string(),
            parser: FrameParser::new(),
            rx: None,
        }
    }

    /// List all available network interfaces.
    pub fn list_interfaces() -> Vec<String> {
        datalink::interfaces()
            .into_iter()
            .map(|iface| {
                let status = if iface.is_up() { "UP" } else { "DOWN" };
                let ips: Vec<_> = iface.ips.iter().map(|ip| ip.to_string()).collect();
                format!(
                    "{}: {} [{}]",
                    iface.name,
                    status,
                    if ips.is_empty() {
                        "no IP".to_string()
                    } else {
                        ips.join(", ")
                    }
                )
            })
            .collect()
    }

    fn open_channel(&mut self) -> Result<(), CaptureError> {
        let interface = find_interface(self.interface.as_deref())?;
        self.label = interface.name.clone();

        let config = Config {
            read_timeout: Some(READ_TIMEOUT),
            ..Config::default()
        };

        let rx = match datalink::channel(&interface, config) {
            Ok(Channel::Ethernet(_tx, rx)) => rx,
            Ok(_) => {
                return Err(CaptureError::ChannelCreation(
                    "unsupported channel type".to_string(),
                ))
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("permission") || msg.contains("Operation not permitted") {
                    return Err(CaptureError::InsufficientPermissions);
                }
                return Err(CaptureError::ChannelCreation(msg));
            }
        };

        debug!("Opened capture channel on {}", interface.name);
        self.rx = Some(rx);
        Ok(())
    }
}

impl FrameSource for PnetCapture {
    fn poll(&mut self, window: Duration) -> Result<Vec<Frame>, CaptureError> {
        if self.rx.is_none() {
            self.open_channel()?;
        }
        let rx = self
            .rx
            .as_mut()
            .ok_or_else(|| CaptureError::ChannelCreation("channel not open".to_string()))?;

        let deadline = Instant::now() + window;
        let mut frames = Vec::new();
        let mut failure = None;

        while Instant::now() < deadline {
            match rx.next() {
                Ok(data) => match self.parser.parse(data) {
                    Ok(frame) => frames.push(frame),
                    Err(e) => debug!("Dropping undecodable frame: {}", e),
                },
                // Timeout is expected, keep filling the window
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            self.rx = None;
            return Err(CaptureError::Read(e));
        }

        Ok(frames)
    }

    fn interface_name(&self) -> &str {
        &self.label
    }
}

/// Resolve the configured interface, or pick one that is up, not loopback
/// and has an address.
fn find_interface(name: Option<&str>) -> Result<NetworkInterface, CaptureError> {
    let interfaces = datalink::interfaces();
    match name {
        Some(name) => interfaces
            .into_iter()
            .find(|iface| iface.name == name)
            .ok_or_else(|| CaptureError::InterfaceNotFound(name.to_string())),
        None => interfaces
            .into_iter()
            .find(|iface| iface.is_up() && !iface.is_loopback() && !iface.ips.is_empty())
            .ok_or_else(|| {
                CaptureError::InterfaceNotFound("no suitable interface found".to_string())
            }),
    }
}

/// Opens a `PnetCapture` per worker on one interface.
#[derive(Debug, Clone, Default)]
pub struct PnetCaptureFactory {
    interface: Option<String>,
}

impl PnetCaptureFactory {
    pub fn new(interface: Option<String>) -> Self {
        Self { interface }
    }
}

impl CaptureFactory for PnetCaptureFactory {
    fn open(&self) -> Box<dyn FrameSource> {
        Box::new(PnetCapture::new(self.interface.as_deref()))
    }
}
