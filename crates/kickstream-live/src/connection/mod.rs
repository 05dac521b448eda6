//! WebSocket connection manager with fixed-delay reconnect.
//!
//! A background tokio task owns the socket and forwards every text frame
//! over a bounded channel; nothing received is processed on the socket
//! task. Progress is published as a [`ConnectionStatus`] on a watch channel.

mod manager;
mod transport;
mod types;
mod worker;


pub use manager::ConnectionManager;
pub use transport::{
    Connector, FrameStream, TransportFrame, WsConnector, ABNORMAL_CLOSURE, NORMAL_CLOSURE,
};
pub use types::{ConnectionConfig, ConnectionState, ConnectionStatus};
