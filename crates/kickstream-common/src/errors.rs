use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the live-feed socket. These are recorded and retried by the
/// connection manager; they never leave the live crate as hard errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connection timed out after {0}s")]
    Timeout(u64),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("connection closed (code {0})")]
    Closed(u16),
}

/// Failures reported by the gameplay layer when asked to run an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameplayError {
    #[error("gameplay capability unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum KickstreamError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gameplay(#[from] GameplayError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("hearts.capacity = 0 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: hearts.capacity = 0 is out of range"
        );
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::Connect("connection refused".into());
        assert_eq!(err.to_string(), "connection failed: connection refused");

        let err = TransportError::Timeout(15);
        assert_eq!(err.to_string(), "connection timed out after 15s");

        let err = TransportError::Closed(1006);
        assert_eq!(err.to_string(), "connection closed (code 1006)");
    }

    #[test]
    fn gameplay_error_display() {
        let err = GameplayError::Unavailable("no match running".into());
        assert_eq!(
            err.to_string(),
            "gameplay capability unavailable: no match running"
        );
    }

    #[test]
    fn kickstream_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: KickstreamError = config_err.into();
        assert!(matches!(err, KickstreamError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn kickstream_error_from_gameplay() {
        let err: KickstreamError = GameplayError::Unavailable("no match running".into()).into();
        assert!(matches!(err, KickstreamError::Gameplay(_)));
        assert_eq!(
            err.to_string(),
            "gameplay capability unavailable: no match running"
        );
    }

    #[test]
    fn kickstream_error_other_variants() {
        let err = KickstreamError::UnknownCommand("dance".into());
        assert_eq!(err.to_string(), "unknown command: dance");

        let err = KickstreamError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
