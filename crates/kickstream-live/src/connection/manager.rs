//! Owner-facing handle for the feed connection.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::transport::Connector;
use super::types::{ConnectionConfig, ConnectionState, ConnectionStatus};
use super::worker::{connection_loop, WorkerContext};

struct Worker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Starts and stops the background connection task.
///
/// Frames received while connected are sent on the `frame_tx` handed to
/// [`ConnectionManager::new`].
pub struct ConnectionManager {
    config: ConnectionConfig,
    connector: Arc<dyn Connector>,
    frame_tx: mpsc::Sender<String>,
    status: Arc<watch::Sender<ConnectionStatus>>,
    worker: Option<Worker>,
}

impl ConnectionManager {
    pub fn new(
        config: ConnectionConfig,
        connector: Arc<dyn Connector>,
        frame_tx: mpsc::Sender<String>,
    ) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::default());
        Self {
            config,
            connector,
            frame_tx,
            status: Arc::new(status),
            worker: None,
        }
    }

    /// Start the connection task and wait for its first attempt to resolve.
    ///
    /// A no-op while a task is still running. Starting again after the
    /// reconnect budget ran out begins with a fresh attempt counter.
    pub async fn connect(&mut self) -> ConnectionState {
        let Some(first_rx) = self.spawn_worker(true) else {
            return self.state();
        };
        match first_rx.await {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    /// Start the connection task and return at once. Progress is published
    /// on the status channel. Returns `false` if a task was already running.
    pub fn start(&mut self) -> bool {
        self.spawn_worker(false).is_some()
    }

    fn spawn_worker(&mut self, report_first: bool) -> Option<oneshot::Receiver<ConnectionState>> {
        if let Some(worker) = &self.worker {
            if !worker.handle.is_finished() {
                info!(state = ?self.state(), "connection task already running");
                return None;
            }
        }
        self.worker = None;

        let cancel = CancellationToken::new();
        let (first_tx, first_rx) = oneshot::channel();
        self.status.send_modify(|s| {
            s.state = ConnectionState::Connecting;
            s.reconnect_attempts = 0;
        });

        let handle = tokio::spawn(connection_loop(WorkerContext {
            config: self.config.clone(),
            connector: Arc::clone(&self.connector),
            frame_tx: self.frame_tx.clone(),
            status: Arc::clone(&self.status),
            cancel: cancel.clone(),
            first_outcome: report_first.then_some(first_tx),
        }));
        self.worker = Some(Worker { cancel, handle });
        Some(first_rx)
    }

    /// Stop the connection task, closing the socket and cancelling any
    /// pending reconnect. Safe to call repeatedly.
    pub async fn disconnect(&mut self) {
        let Some(worker) = self.worker.take() else {
            debug!("disconnect requested with no connection task");
            return;
        };

        worker.cancel.cancel();
        if let Err(e) = worker.handle.await {
            warn!(error = %e, "connection task ended abnormally");
        }
        self.status.send_replace(ConnectionStatus::default());
        info!("disconnected from feed");
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn state(&self) -> ConnectionState {
        self.status.borrow().state
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    /// Watch status changes.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel.cancel();
        }
    }
}
