//! Session state machine for acquisition and monitoring.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::capture::{CaptureFactory, CaptureFilter};
use crate::classifier::{
    AcquisitionClassifier, ArpSpoofClassifier, FrameClassifier, KnownUnknownClassifier,
    MacSpoofClassifier,
};
use crate::error::{ControllerError, RegistryError};
use crate::registry::AddressRegistry;
use crate::reporter::EventSink;
use crate::worker::{CancellationSignal, CaptureWorker, DEFAULT_CAPTURE_WINDOW};

/// Kind of capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Acquisition,
    Monitoring,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Acquisition => write!(f, "acquisition"),
            SessionKind::Monitoring => write!(f, "monitoring"),
        }
    }
}

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AcquisitionRunning,
    MonitoringRunning,
}

struct Session {
    kind: SessionKind,
    signal: CancellationSignal,
    workers: Vec<JoinHandle<()>>,
}

/// Starts and stops capture sessions.
///
/// At most one session runs at a time. Each session gets a fresh
/// cancellation signal, so workers left behind by a fire-and-forget stop
/// can never be revived by the next start.
///
/// `stop_monitoring` joins its workers while holding the session lock;
/// other controller calls wait for it, which bounds them by one capture
/// window.
pub struct TaskController {
    registry: Arc<AddressRegistry>,
    capture: Arc<dyn CaptureFactory>,
    sink: Arc<dyn EventSink>,
    window: Duration,
    session: Mutex<Option<Session>>,
}

impl TaskController {
    pub fn new(
        registry: Arc<AddressRegistry>,
        capture: Arc<dyn CaptureFactory>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            registry,
            capture,
            sink,
            window: DEFAULT_CAPTURE_WINDOW,
            session: Mutex::new(None),
        }
    }

    /// Set the capture window used by every worker this controller starts.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn registry(&self) -> &Arc<AddressRegistry> {
        &self.registry
    }

    pub fn state(&self) -> ControllerState {
        match self.lock().as_ref().map(|s| s.kind) {
            None => ControllerState::Idle,
            Some(SessionKind::Acquisition) => ControllerState::AcquisitionRunning,
            Some(SessionKind::Monitoring) => ControllerState::MonitoringRunning,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, line: impl AsRef<str>) {
        self.sink.emit(line.as_ref());
    }

    /// Select and load the known-address file.
    ///
    /// Only a missing file fails the call; read errors are reported as a
    /// status line.
    pub fn select_known_file(&self, path: impl AsRef<Path>) -> Result<(), ControllerError> {
        let path = path.as_ref();
        match self.registry.set_known_file(path) {
            Ok(count) => {
                self.emit(format!("[+] Selected known MAC file: {}", path.display()));
                self.emit(format!("[+] Loaded {} MAC addresses from the file.", count));
                Ok(())
            }
            Err(e @ RegistryError::FileNotFound(_)) => {
                self.emit(format!("[!] The selected file does not exist: {}", path.display()));
                Err(e.into())
            }
            Err(e) => {
                warn!("Known file selected but not loaded: {}", e);
                self.emit(format!("[!] Error reading known MAC file: {}", e));
                Ok(())
            }
        }
    }

    /// Select the unknown-address file.
    pub fn select_unknown_file(&self, path: impl AsRef<Path>) -> Result<(), ControllerError> {
        let path = path.as_ref();
        match self.registry.set_unknown_file(path) {
            Ok(()) => {
                self.emit(format!("[+] Selected unknown MAC file: {}", path.display()));
                Ok(())
            }
            Err(e) => {
                self.emit(format!("[!] The selected file does not exist: {}", path.display()));
                Err(e.into())
            }
        }
    }

    /// Start the single acquisition worker.
    pub fn start_acquisition(&self) -> Result<(), ControllerError> {
        let mut session = self.lock();
        if let Some(running) = session.as_ref() {
            return Err(self.refuse(SessionKind::Acquisition, running.kind));
        }

        self.emit("[*] Starting MAC address acquisition...");
        let classifier: Arc<dyn FrameClassifier> =
            Arc::new(AcquisitionClassifier::new(Arc::clone(&self.registry)));
        *session = Some(self.spawn_session(
            SessionKind::Acquisition,
            vec![(CaptureFilter::Ip, classifier)],
        )?);
        Ok(())
    }

    /// Signal whatever session is running to stop, without waiting.
    pub fn stop_all(&self) {
        let taken = self.lock().take();
        self.emit("[*] Stopping all threads...");

        if let Some(session) = taken {
            session.signal.cancel();
            info!(
                "Signalled {} {} worker(s) to stop",
                session.workers.len(),
                session.kind
            );
            // Handles are dropped: workers exit on their own within a window.
        }
    }

    /// Start the three monitoring workers.
    ///
    /// If monitoring is already running it is fully stopped first and a
    /// fresh session is started.
    pub fn start_monitoring(&self) -> Result<(), ControllerError> {
        let mut session = self.lock();
        match session.as_ref().map(|s| s.kind) {
            Some(SessionKind::Monitoring) => {
                self.emit("[*] Network monitoring is already running. Restarting...");
                if let Some(running) = session.take() {
                    self.drain(running);
                }
            }
            Some(other) => return Err(self.refuse(SessionKind::Monitoring, other)),
            None => {}
        }

        self.emit("[*] Starting network monitoring threads...");
        let workers: Vec<(CaptureFilter, Arc<dyn FrameClassifier>)> = vec![
            (
                CaptureFilter::Ip,
                Arc::new(KnownUnknownClassifier::new(Arc::clone(&self.registry))),
            ),
            (CaptureFilter::Arp, Arc::new(ArpSpoofClassifier::new())),
            (CaptureFilter::Arp, Arc::new(MacSpoofClassifier::new())),
        ];
        *session = Some(self.spawn_session(SessionKind::Monitoring, workers)?);
        Ok(())
    }

    /// Stop monitoring and wait until every monitoring worker has exited.
    pub fn stop_monitoring(&self) {
        let mut session = self.lock();
        if !matches!(session.as_ref(), Some(s) if s.kind == SessionKind::Monitoring) {
            self.emit("[*] Network monitoring is not running.");
            return;
        }

        if let Some(running) = session.take() {
            self.drain(running);
        }
    }

    /// Cancel a session and join its workers.
    fn drain(&self, session: Session) {
        session.signal.cancel();
        self.emit("[*] Stopping network monitoring...");

        for handle in session.workers {
            if handle.join().is_err() {
                error!("A {} worker panicked", session.kind);
                self.emit(format!("[!] A {} worker terminated abnormally.", session.kind));
            }
        }

        self.emit("[*] All monitoring threads stopped.");
    }

    fn refuse(&self, requested: SessionKind, running: SessionKind) -> ControllerError {
        warn!("Refusing to start {} while {} is running", requested, running);
        self.emit(format!(
            "[!] Cannot start {}: {} is already running. Stop it first.",
            requested, running
        ));
        ControllerError::SessionActive(running)
    }

    fn spawn_session(
        &self,
        kind: SessionKind,
        workers: Vec<(CaptureFilter, Arc<dyn FrameClassifier>)>,
    ) -> Result<Session, ControllerError> {
        let signal = CancellationSignal::new();
        let mut handles = Vec::with_capacity(workers.len());

        for (filter, classifier) in workers {
            let worker = CaptureWorker::new(
                filter,
                classifier,
                self.capture.open(),
                signal.clone(),
                Arc::clone(&self.sink),
            )
            .with_window(self.window);

            match worker.spawn() {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    signal.cancel();
                    error!("Failed to spawn {} worker: {}", kind, e);
                    self.emit(format!("[!] Failed to start {} worker: {}", kind, e));
                    return Err(ControllerError::Spawn(e));
                }
            }
        }

        info!("Started {} session with {} worker(s)", kind, handles.len());
        Ok(Session {
            kind,
            signal,
            workers: handles,
        })
    }
}

impl Drop for TaskController {
    fn drop(&mut self) {
        if let Some(session) = self.lock().take() {
            session.signal.cancel();
        }
    }
}
