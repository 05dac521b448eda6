//! kickstream-sim: WebSocket test feed for kickstream.
//!
//! Every client is greeted with a `system` frame and then receives a random
//! like, rose or perfume event at a fixed interval.

mod connection;
mod protocol;

use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;

use crate::connection::{handle_connection, FeedSettings};

#[derive(Parser)]
#[command(name = "kickstream-sim", about = "Random audience-event feed for testing kickstream")]
struct Args {
    /// Port to listen on.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Milliseconds between events sent to each client.
    #[arg(long, default_value_t = 3000, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Largest rose combo to generate. 1 sends roses without a repeat count.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    max_combo: u32,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kickstream_sim=info".into()),
        )
        .init();

    let args = Args::parse();
    let settings = FeedSettings {
        interval: Duration::from_millis(args.interval_ms),
        max_combo: args.max_combo,
    };

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        interval_ms = args.interval_ms,
        max_combo = args.max_combo,
        "kickstream-sim listening on ws://{}",
        addr
    );

    // Accept loop.
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tokio::spawn(async move {
                    match accept_async(stream).await {
                        Ok(ws) => handle_connection(ws, addr, settings).await,
                        Err(e) => {
                            tracing::warn!(peer = %addr, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
    }
}
