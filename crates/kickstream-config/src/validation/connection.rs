use crate::schema::KickstreamConfig;

use super::helpers::validate_range;

/// Validate the live feed connection section.
pub(crate) fn validate_connection(errors: &mut Vec<String>, config: &KickstreamConfig) {
    let conn = &config.connection;

    let url = conn.server_url.trim();
    if !(url.starts_with("ws://") || url.starts_with("wss://")) {
        errors.push(format!(
            "connection.server_url = {url:?} must start with ws:// or wss://"
        ));
    }

    validate_range(
        errors,
        "connection.reconnect_delay_secs",
        conn.reconnect_delay_secs,
        0,
        300,
    );
    validate_range(
        errors,
        "connection.connect_timeout_secs",
        conn.connect_timeout_secs,
        1,
        120,
    );
    if conn.max_reconnect_attempts == Some(0) {
        errors.push("connection.max_reconnect_attempts must be at least 1 when set".into());
    }
}
