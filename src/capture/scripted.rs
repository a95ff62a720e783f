//! Scripted frame sources for worker and controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{CaptureFactory, FrameSource};
use crate::domain::Frame;
use crate::error::CaptureError;

/// Replays scripted windows, then idles one window per poll.
pub(crate) struct ScriptedSource {
    script: VecDeque<Result<Vec<Frame>, CaptureError>>,
    polls: Arc<AtomicUsize>,
    alive: Option<Arc<AtomicUsize>>,
}

impl ScriptedSource {
    pub(crate) fn new(script: Vec<Result<Vec<Frame>, CaptureError>>) -> Self {
        Self {
            script: script.into(),
            polls: Arc::new(AtomicUsize::new(0)),
            alive: None,
        }
    }

    pub(crate) fn idle() -> Self {
        Self::new(Vec::new())
    }

    pub(crate) fn poll_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.polls)
    }

    fn tracked(mut self, alive: Arc<AtomicUsize>) -> Self {
        alive.fetch_add(1, Ordering::SeqCst);
        self.alive = Some(alive);
        self
    }
}

impl FrameSource for ScriptedSource {
    fn poll(&mut self, window: Duration) -> Result<Vec<Frame>, CaptureError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        match self.script.pop_front() {
            Some(step) => step,
            None => {
                thread::sleep(window);
                Ok(Vec::new())
            }
        }
    }

    fn interface_name(&self) -> &str {
        "test0"
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        if let Some(alive) = &self.alive {
            alive.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Hands every worker the same single window of frames and tracks how
/// many sources are still owned by a running worker.
#[derive(Default)]
pub(crate) struct ScriptedFactory {
    frames: Vec<Frame>,
    opened: AtomicUsize,
    alive: Arc<AtomicUsize>,
}

impl ScriptedFactory {
    pub(crate) fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    pub(crate) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn alive(&self) -> usize {
        self.alive.load(Ordering::SeqCst)
    }
}

impl CaptureFactory for ScriptedFactory {
    fn open(&self) -> Box<dyn FrameSource> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let script = if self.frames.is_empty() {
            Vec::new()
        } else {
            vec![Ok(self.frames.clone())]
        };
        Box::new(ScriptedSource::new(script).tracked(Arc::clone(&self.alive)))
    }
}
