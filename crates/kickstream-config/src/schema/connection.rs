use serde::{Deserialize, Serialize};

/// Live feed socket settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// WebSocket URL of the audience-event server.
    pub server_url: String,
    /// Whether to connect automatically on startup.
    pub auto_connect: bool,
    /// Fixed wait between reconnect attempts, in seconds (valid range: 0-300).
    pub reconnect_delay_secs: u32,
    /// Per-attempt handshake timeout, in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Maximum reconnect attempts before giving up. Absent means unbounded.
    pub max_reconnect_attempts: Option<u32>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:8080".into(),
            auto_connect: true,
            reconnect_delay_secs: 5,
            connect_timeout_secs: 15,
            max_reconnect_attempts: None,
        }
    }
}
