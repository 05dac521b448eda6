//! Live audience-event ingestion for kickstream.
//!
//! Likes and gifts arrive as JSON frames over a WebSocket. Likes fill a
//! heart accumulator that periodically draws a winner; rose gifts queue a
//! combo action; perfume gifts spawn a squad directly. Combo actions are
//! paced through a single FIFO so the gameplay layer never runs two at once.
//!
//! [`LiveSession`] owns all of it and is driven by calling
//! [`LiveSession::tick`] at a fixed rate.

pub mod connection;
pub mod dispatch;
pub mod gameplay;
pub mod hearts;
pub mod parser;
pub mod protocol;
pub mod random;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use connection::{
    ConnectionConfig, ConnectionManager, ConnectionState, ConnectionStatus, Connector,
    FrameStream, TransportFrame, WsConnector,
};
pub use dispatch::{ComboQueue, DispatcherState, QueueEntry};
pub use gameplay::{GameplayActions, ManualCommand};
pub use hearts::HeartAccumulator;
pub use parser::{EventParser, FrameRejection, GiftCatalog};
pub use protocol::{AudienceEvent, GiftEvent, GiftKind};
pub use random::{FixedSequence, RandomSource, SeededRandom};
pub use session::{LiveSession, SessionConfig, SessionSnapshot};
