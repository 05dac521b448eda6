//! Background connection task: connect, read, reconnect.

use std::sync::Arc;

use kickstream_common::TransportError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::transport::{Connector, FrameStream, TransportFrame, ABNORMAL_CLOSURE, NORMAL_CLOSURE};
use super::types::{ConnectionConfig, ConnectionState, ConnectionStatus};

/// Everything the connection task needs. Built by the manager per `connect()`.
pub(crate) struct WorkerContext {
    pub(crate) config: ConnectionConfig,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) frame_tx: mpsc::Sender<String>,
    pub(crate) status: Arc<watch::Sender<ConnectionStatus>>,
    pub(crate) cancel: CancellationToken,
    /// Resolved with the outcome of the first connection attempt.
    pub(crate) first_outcome: Option<oneshot::Sender<ConnectionState>>,
}

impl WorkerContext {
    fn publish(&self, update: impl FnOnce(&mut ConnectionStatus)) {
        self.status.send_modify(update);
    }

    fn report_first(&mut self, state: ConnectionState) {
        if let Some(tx) = self.first_outcome.take() {
            let _ = tx.send(state);
        }
    }
}

/// How a connection attempt or an open session ended.
#[derive(Debug)]
enum SessionEnd {
    /// Cancelled by the owner.
    Shutdown,
    /// The peer closed with code 1000.
    NormalClose,
    /// Anything else; eligible for reconnect.
    Lost(String),
}

// ---------------------------------------------------------------------------
// Connection Loop
// ---------------------------------------------------------------------------

pub(crate) async fn connection_loop(mut ctx: WorkerContext) {
    let url = ctx.config.server_url.clone();
    let mut attempts: u32 = 0;

    loop {
        ctx.publish(|s| {
            s.state = ConnectionState::Connecting;
            s.reconnect_attempts = attempts;
        });
        info!(url = %url, attempt = attempts, "connecting to feed");

        let outcome = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            outcome = tokio::time::timeout(ctx.config.connect_timeout, ctx.connector.connect(&url)) => outcome,
        };

        let end = match outcome {
            Ok(Ok(mut stream)) => {
                attempts = 0;
                ctx.publish(|s| {
                    s.state = ConnectionState::Connected;
                    s.reconnect_attempts = 0;
                    s.last_error = None;
                });
                ctx.report_first(ConnectionState::Connected);
                info!(url = %url, "connected to feed");

                let end = receive_frames(stream.as_mut(), &ctx).await;
                if let Err(e) = stream.close().await {
                    debug!(error = %e, "error while closing feed stream");
                }
                end
            }
            Ok(Err(e)) => {
                warn!(error = %e, "failed to connect to feed");
                SessionEnd::Lost(e.to_string())
            }
            Err(_elapsed) => {
                let e = TransportError::Timeout(ctx.config.connect_timeout.as_secs());
                warn!(error = %e, "feed handshake timed out");
                SessionEnd::Lost(e.to_string())
            }
        };

        match end {
            SessionEnd::Shutdown => break,
            SessionEnd::NormalClose => {
                info!("feed closed the connection normally");
                break;
            }
            SessionEnd::Lost(error) => {
                ctx.publish(|s| s.last_error = Some(error));

                if !ctx.config.allows_attempt(attempts) {
                    warn!(attempts, "reconnect attempts exhausted, staying disconnected");
                    break;
                }

                attempts += 1;
                ctx.publish(|s| {
                    s.state = ConnectionState::Reconnecting { attempt: attempts };
                    s.reconnect_attempts = attempts;
                });
                ctx.report_first(ConnectionState::Reconnecting { attempt: attempts });

                let delay = ctx.config.reconnect_delay;
                info!(
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "reconnecting to feed"
                );
                tokio::select! {
                    biased;
                    _ = ctx.cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }

    ctx.publish(|s| s.state = ConnectionState::Disconnected);
    ctx.report_first(ConnectionState::Disconnected);
    debug!("connection task finished");
}

// ---------------------------------------------------------------------------
// Read Loop
// ---------------------------------------------------------------------------

async fn receive_frames(stream: &mut dyn FrameStream, ctx: &WorkerContext) -> SessionEnd {
    loop {
        let next = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return SessionEnd::Shutdown,
            next = stream.next_frame() => next,
        };

        let text = match next {
            None => {
                let e = TransportError::Closed(ABNORMAL_CLOSURE);
                warn!(error = %e, "feed stream ended without a close frame");
                return SessionEnd::Lost(e.to_string());
            }
            Some(Err(e)) => {
                warn!(error = %e, "feed connection error");
                return SessionEnd::Lost(e.to_string());
            }
            Some(Ok(TransportFrame::Close(code))) => {
                if code == Some(NORMAL_CLOSURE) {
                    return SessionEnd::NormalClose;
                }
                let e = TransportError::Closed(code.unwrap_or(ABNORMAL_CLOSURE));
                warn!(error = %e, "feed closed the connection");
                return SessionEnd::Lost(e.to_string());
            }
            Some(Ok(TransportFrame::Text(text))) => text,
            Some(Ok(TransportFrame::Binary(bytes))) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "dropping binary frame that is not UTF-8");
                    continue;
                }
            },
        };

        tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return SessionEnd::Shutdown,
            sent = ctx.frame_tx.send(text) => {
                if sent.is_err() {
                    debug!("frame receiver dropped, stopping connection task");
                    return SessionEnd::Shutdown;
                }
            }
        }
    }
}
