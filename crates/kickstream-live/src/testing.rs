//! Test doubles shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use kickstream_common::{GameplayError, TransportError};

use crate::connection::{Connector, FrameStream, TransportFrame};
use crate::gameplay::GameplayActions;

/// Records every action. A combo action starts "resolving" until the test
/// calls `finish_combo`.
#[derive(Default)]
pub(crate) struct RecordingGameplay {
    combos: Mutex<Vec<u32>>,
    squads: AtomicUsize,
    resolving: AtomicBool,
    unavailable: AtomicBool,
}

impl RecordingGameplay {
    pub(crate) fn combos(&self) -> Vec<u32> {
        self.combos.lock().unwrap().clone()
    }

    pub(crate) fn squads(&self) -> usize {
        self.squads.load(Ordering::SeqCst)
    }

    pub(crate) fn finish_combo(&self) {
        self.resolving.store(false, Ordering::SeqCst);
    }

    pub(crate) fn start_external_combo(&self) {
        self.resolving.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl GameplayActions for RecordingGameplay {
    fn activate_combo_action(&self, combo_count: u32) -> Result<(), GameplayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GameplayError::Unavailable("no match running".into()));
        }
        self.combos.lock().unwrap().push(combo_count);
        self.resolving.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn activate_squad_spawn_action(&self) -> Result<(), GameplayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GameplayError::Unavailable("no match running".into()));
        }
        self.squads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_combo_action_resolving(&self) -> bool {
        self.resolving.load(Ordering::SeqCst)
    }
}

/// Connector whose every connection replays the same text frames and then
/// stays open.
pub(crate) struct StaticFeed {
    frames: Vec<String>,
}

impl StaticFeed {
    pub(crate) fn new(frames: &[&str]) -> Self {
        Self {
            frames: frames.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Connector for StaticFeed {
    async fn connect(&self, _url: &str) -> Result<Box<dyn FrameStream>, TransportError> {
        Ok(Box::new(StaticStream {
            frames: self.frames.iter().cloned().map(TransportFrame::Text).collect(),
        }))
    }
}

struct StaticStream {
    frames: VecDeque<TransportFrame>,
}

#[async_trait]
impl FrameStream for StaticStream {
    async fn next_frame(&mut self) -> Option<Result<TransportFrame, TransportError>> {
        match self.frames.pop_front() {
            Some(frame) => Some(Ok(frame)),
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
