//! Connection configuration and observable state.

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Feed endpoint, `ws://` or `wss://`.
    pub server_url: String,
    /// Fixed wait before each reconnect attempt.
    pub reconnect_delay: Duration,
    /// Upper bound on a single handshake.
    pub connect_timeout: Duration,
    /// `None` retries forever.
    pub max_reconnect_attempts: Option<u32>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:8080".to_string(),
            reconnect_delay: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(15),
            max_reconnect_attempts: None,
        }
    }
}

impl ConnectionConfig {
    /// Whether another reconnect is allowed after `attempts` have been made.
    pub(crate) fn allows_attempt(&self, attempts: u32) -> bool {
        match self.max_reconnect_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

/// Snapshot published by the connection task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    /// Reconnect attempts since the last successful open.
    pub reconnect_attempts: u32,
    /// Most recent transport error. Cleared on open and on manual disconnect.
    pub last_error: Option<String>,
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            reconnect_attempts: 0,
            last_error: None,
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.state, &self.last_error) {
            (ConnectionState::Connected, _) => write!(f, "Connected"),
            (ConnectionState::Connecting, _) => write!(f, "Connecting..."),
            (ConnectionState::Reconnecting { attempt }, _) => {
                write!(f, "Reconnecting... ({attempt})")
            }
            (ConnectionState::Disconnected, Some(error)) => write!(f, "Error: {error}"),
            (ConnectionState::Disconnected, None) => write!(f, "Disconnected"),
        }
    }
}
