//! Live session: the connection, parser, accumulator and combo queue wired
//! together behind one owner.
//!
//! Frames arrive on the socket task and are parked in a channel; all state
//! changes happen inside [`LiveSession::tick`] or the direct entry points,
//! which take `&mut self`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use kickstream_common::KickstreamError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::connection::{
    ConnectionConfig, ConnectionManager, ConnectionState, ConnectionStatus, Connector, WsConnector,
};
use crate::dispatch::{ComboQueue, DispatcherState, QueueEntry};
use crate::gameplay::{GameplayActions, ManualCommand};
use crate::hearts::HeartAccumulator;
use crate::parser::{EventParser, GiftCatalog};
use crate::protocol::{AudienceEvent, GiftEvent, GiftKind};
use crate::random::{RandomSource, SeededRandom};

/// Frames buffered between the socket task and the tick.
const FRAME_CHANNEL_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub connection: ConnectionConfig,
    pub rose_aliases: Vec<String>,
    pub perfume_aliases: Vec<String>,
    pub heart_capacity: usize,
    pub pacing_delay: Duration,
    /// Enables the `simulate_*` entry points.
    pub test_mode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            rose_aliases: vec!["Rose".into(), "Hoa hồng".into()],
            perfume_aliases: vec!["Perfume".into(), "Nước hoa".into()],
            heart_capacity: 100,
            pacing_delay: Duration::from_secs(3),
            test_mode: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of the session, for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub connection: ConnectionStatus,
    pub dispatcher: DispatcherState,
    pub queued: usize,
    pub heart_taps: usize,
    pub heart_capacity: usize,
    pub current_subject: Option<String>,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | dispatcher {} | queued {} | hearts {}/{}",
            self.connection,
            self.dispatcher.label(),
            self.queued,
            self.heart_taps,
            self.heart_capacity
        )?;
        if let Some(subject) = &self.current_subject {
            write!(f, " | resolving {subject}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct LiveSession {
    connection: ConnectionManager,
    frame_rx: mpsc::Receiver<String>,
    parser: EventParser,
    hearts: HeartAccumulator,
    queue: ComboQueue,
    gameplay: Arc<dyn GameplayActions>,
    test_mode: bool,
}

impl LiveSession {
    /// Session over a real WebSocket with OS-seeded winner draws.
    pub fn new(config: SessionConfig, gameplay: Arc<dyn GameplayActions>) -> Self {
        Self::with_parts(
            config,
            gameplay,
            Arc::new(WsConnector),
            Box::new(SeededRandom::from_entropy()),
        )
    }

    pub fn with_parts(
        config: SessionConfig,
        gameplay: Arc<dyn GameplayActions>,
        connector: Arc<dyn Connector>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        let catalog = GiftCatalog::new(&config.rose_aliases, &config.perfume_aliases);

        Self {
            connection: ConnectionManager::new(config.connection, connector, frame_tx),
            frame_rx,
            parser: EventParser::new(catalog),
            hearts: HeartAccumulator::new(config.heart_capacity, random),
            queue: ComboQueue::new(config.pacing_delay),
            gameplay,
            test_mode: config.test_mode,
        }
    }

    // -- connection ---------------------------------------------------------

    pub async fn connect(&mut self) -> ConnectionState {
        self.connection.connect().await
    }

    /// Begin connecting in the background without waiting for the first
    /// attempt, so ticks keep running during a slow handshake.
    pub fn start_connection(&mut self) -> bool {
        self.connection.start()
    }

    pub async fn disconnect(&mut self) {
        self.connection.disconnect().await;
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connection.status()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.connection.subscribe()
    }

    // -- tick ---------------------------------------------------------------

    /// Process every frame received since the last tick, in arrival order,
    /// then advance the combo queue by `elapsed`. Returns the number of
    /// frames processed.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let mut processed = 0;
        while let Ok(raw) = self.frame_rx.try_recv() {
            self.handle_frame(&raw);
            processed += 1;
        }
        self.queue.tick(elapsed, self.gameplay.as_ref());
        processed
    }

    /// Parse one raw frame and apply the resulting event, if any.
    pub fn handle_frame(&mut self, raw: &str) {
        if let Some(event) = self.parser.parse(raw) {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AudienceEvent) {
        match event {
            AudienceEvent::Like { subject, count } => {
                // One tap per like event; the count is informational.
                debug!(subject = %subject, count, "like received");
                self.add_heart_tap(&subject);
            }
            AudienceEvent::Gift(gift) => {
                debug!(
                    kind = gift.kind.label(),
                    repeat_count = gift.repeat_count,
                    gift_id = ?gift.gift_id,
                    "gift received"
                );
                match gift.kind {
                    GiftKind::Rose => self.enqueue_combo(&gift.subject, gift.repeat_count),
                    GiftKind::Perfume => self.trigger_squad_spawn(),
                    GiftKind::Unrecognized => {
                        info!(gift = %gift.gift_name, "ignoring unmapped gift");
                    }
                }
            }
        }
    }

    // -- direct entry points ------------------------------------------------

    pub fn add_heart_tap(&mut self, subject: &str) {
        if subject.is_empty() {
            warn!("heart tap without subject dropped");
            return;
        }
        if let Some(winner) = self.hearts.add_tap(subject) {
            self.queue.enqueue(winner, self.gameplay.as_ref());
        }
    }

    pub fn enqueue_combo(&mut self, subject: &str, combo_count: u32) {
        if subject.is_empty() {
            warn!(combo_count, "combo without subject dropped");
            return;
        }
        self.queue
            .enqueue(QueueEntry::new(subject, combo_count), self.gameplay.as_ref());
    }

    /// Run an operator command directly against the gameplay layer,
    /// bypassing the queue.
    pub fn run_command(&mut self, command: &str) -> Result<(), KickstreamError> {
        match command.parse::<ManualCommand>()? {
            ManualCommand::Combo => self.gameplay.activate_combo_action(1)?,
            ManualCommand::SquadSpawn => self.gameplay.activate_squad_spawn_action()?,
        }
        info!(command = %command.trim(), "manual command executed");
        Ok(())
    }

    fn trigger_squad_spawn(&self) {
        match self.gameplay.activate_squad_spawn_action() {
            Ok(()) => info!("squad spawn triggered"),
            Err(e) => warn!(error = %e, "squad spawn failed"),
        }
    }

    // -- simulators ---------------------------------------------------------

    pub fn simulate_like(&mut self, subject: &str) -> bool {
        self.simulate(
            subject,
            AudienceEvent::Like {
                subject: subject.to_string(),
                count: 1,
            },
        )
    }

    pub fn simulate_rose_gift(&mut self, subject: &str, repeat_count: u32) -> bool {
        self.simulate(
            subject,
            AudienceEvent::Gift(GiftEvent {
                subject: subject.to_string(),
                gift_name: "Rose".to_string(),
                kind: GiftKind::Rose,
                repeat_count: repeat_count.max(1),
                gift_id: None,
            }),
        )
    }

    pub fn simulate_perfume_gift(&mut self, subject: &str) -> bool {
        self.simulate(
            subject,
            AudienceEvent::Gift(GiftEvent {
                subject: subject.to_string(),
                gift_name: "Perfume".to_string(),
                kind: GiftKind::Perfume,
                repeat_count: 1,
                gift_id: None,
            }),
        )
    }

    fn simulate(&mut self, subject: &str, event: AudienceEvent) -> bool {
        if !self.test_mode {
            warn!("simulators are only available in test mode");
            return false;
        }
        if subject.is_empty() {
            warn!("simulated event without subject dropped");
            return false;
        }
        self.handle_event(event);
        true
    }

    // -- introspection ------------------------------------------------------

    pub fn queue(&self) -> &ComboQueue {
        &self.queue
    }

    pub fn hearts(&self) -> &HeartAccumulator {
        &self.hearts
    }

    pub fn dispatcher_state(&self) -> DispatcherState {
        self.queue.state()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current_subject(&self) -> Option<&str> {
        self.queue.current_subject()
    }

    pub fn clear_current_subject(&mut self) {
        self.queue.clear_current_subject();
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn reset_hearts(&mut self) {
        self.hearts.reset();
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            connection: self.status(),
            dispatcher: self.queue.state(),
            queued: self.queue.len(),
            heart_taps: self.hearts.tap_count(),
            heart_capacity: self.hearts.capacity(),
            current_subject: self.queue.current_subject().map(str::to_owned),
        }
    }
}
