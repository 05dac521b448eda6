pub mod errors;

pub use errors::{ConfigError, GameplayError, KickstreamError, TransportError};

pub type Result<T> = std::result::Result<T, KickstreamError>;
