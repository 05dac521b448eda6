//! Combo dispatch queue.
//!
//! A FIFO of pending combo entries drained by a single consumer tick. The
//! pacing state machine guarantees at least `pacing_delay` between the end
//! of one combo action and the start of the next, except for the cold-start
//! fast path where nothing is queued, pending or running.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::gameplay::GameplayActions;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One pending combo action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub subject: String,
    /// Number of simultaneous effects, at least 1. Never split.
    pub combo_count: u32,
}

impl QueueEntry {
    pub fn new(subject: impl Into<String>, combo_count: u32) -> Self {
        Self {
            subject: subject.into(),
            combo_count: combo_count.max(1),
        }
    }
}

/// Pacing state of the queue consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Countdown { remaining: Duration },
    Active,
}

impl DispatcherState {
    pub fn label(&self) -> &'static str {
        match self {
            DispatcherState::Idle => "idle",
            DispatcherState::Countdown { .. } => "countdown",
            DispatcherState::Active => "active",
        }
    }
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ComboQueue {
    entries: VecDeque<QueueEntry>,
    state: DispatcherState,
    pacing_delay: Duration,
    current_subject: Option<String>,
}

impl ComboQueue {
    pub fn new(pacing_delay: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            state: DispatcherState::Idle,
            pacing_delay,
            current_subject: None,
        }
    }

    /// Append an entry. Returns `true` when it was dispatched immediately
    /// through the fast path.
    pub fn enqueue(&mut self, entry: QueueEntry, gameplay: &dyn GameplayActions) -> bool {
        let fast_path = self.state == DispatcherState::Idle
            && self.entries.is_empty()
            && !gameplay.is_combo_action_resolving();

        info!(
            subject = %entry.subject,
            combo_count = entry.combo_count,
            queued = self.entries.len() + 1,
            fast_path,
            "combo queued"
        );
        self.entries.push_back(entry);

        if fast_path {
            self.dispatch_next(gameplay);
        }
        fast_path
    }

    /// Advance the pacing state machine by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration, gameplay: &dyn GameplayActions) {
        let resolving = gameplay.is_combo_action_resolving();

        match self.state {
            DispatcherState::Active => {
                if resolving {
                    return;
                }
                debug!(queued = self.entries.len(), "combo action finished");
                self.current_subject = None;
                if self.entries.is_empty() {
                    self.state = DispatcherState::Idle;
                    return;
                }
                self.state = DispatcherState::Countdown {
                    remaining: self.pacing_delay,
                };
            }
            DispatcherState::Idle | DispatcherState::Countdown { .. } if resolving => {
                // A combo action started outside the queue; wait for it.
                debug!("combo action resolving externally");
                self.state = DispatcherState::Active;
                return;
            }
            DispatcherState::Idle => {
                if self.entries.is_empty() {
                    return;
                }
                self.state = DispatcherState::Countdown {
                    remaining: self.pacing_delay,
                };
            }
            DispatcherState::Countdown { .. } => {}
        }

        if let DispatcherState::Countdown { remaining } = self.state {
            let remaining = remaining.saturating_sub(elapsed);
            if !remaining.is_zero() {
                self.state = DispatcherState::Countdown { remaining };
            } else if self.entries.is_empty() {
                self.state = DispatcherState::Idle;
            } else {
                self.dispatch_next(gameplay);
            }
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queued entries, head first.
    pub fn pending(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// Drop every queued entry. A running action is left alone; a pending
    /// countdown is cancelled.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        if matches!(self.state, DispatcherState::Countdown { .. }) {
            self.state = DispatcherState::Idle;
        }
        info!(dropped, "combo queue cleared");
    }

    /// Subject of the combo action currently resolving. Cleared when the
    /// action finishes; never set for an activation that failed.
    pub fn current_subject(&self) -> Option<&str> {
        self.current_subject.as_deref()
    }

    pub fn clear_current_subject(&mut self) {
        self.current_subject = None;
    }

    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }

    fn dispatch_next(&mut self, gameplay: &dyn GameplayActions) {
        let Some(entry) = self.entries.pop_front() else {
            self.state = DispatcherState::Idle;
            return;
        };

        self.state = DispatcherState::Active;
        self.current_subject = None;
        match gameplay.activate_combo_action(entry.combo_count) {
            Ok(()) => {
                info!(
                    subject = %entry.subject,
                    combo_count = entry.combo_count,
                    remaining = self.entries.len(),
                    "combo dispatched"
                );
                self.current_subject = Some(entry.subject);
            }
            Err(e) => {
                warn!(
                    subject = %entry.subject,
                    combo_count = entry.combo_count,
                    error = %e,
                    "combo activation failed, entry dropped"
                );
            }
        }
    }
}
