//! Per-connection handler: greet, then stream random events until the
//! client goes away.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::net::TcpStream;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::protocol::{random_message, FeedMessage};

/// How each client's feed is generated.
#[derive(Debug, Clone, Copy)]
pub struct FeedSettings {
    pub interval: Duration,
    pub max_combo: u32,
}

/// Handle a single WebSocket connection.
pub async fn handle_connection(
    ws: WebSocketStream<TcpStream>,
    addr: SocketAddr,
    settings: FeedSettings,
) {
    let (mut sink, mut stream) = ws.split();

    if let Err(e) = send_message(&mut sink, &FeedMessage::welcome()).await {
        tracing::warn!(peer = %addr, error = %e, "Failed to send welcome");
        return;
    }
    tracing::info!(peer = %addr, "Client connected, streaming test events");

    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let mut sent: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let message = random_message(&mut rng, settings.max_combo);
                if let Err(e) = send_message(&mut sink, &message).await {
                    tracing::debug!(peer = %addr, error = %e, "Send failed");
                    break;
                }
                sent += 1;
                tracing::info!(peer = %addr, sent, event = ?message, "Sent test event");
            }

            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(peer = %addr, error = %e, "WS error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    tracing::info!(peer = %addr, sent, "Client disconnected");
}

#[derive(Debug, thiserror::Error)]
enum SendError {
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("socket: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Send a feed message as a JSON text frame.
async fn send_message(
    sink: &mut SplitSink<WebSocketStream<TcpStream>, Message>,
    message: &FeedMessage,
) -> Result<(), SendError> {
    let json = message.to_json()?;
    sink.send(Message::Text(json.into())).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn greets_then_streams_events() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let settings = FeedSettings {
            interval: Duration::from_millis(10),
            max_combo: 3,
        };

        tokio::spawn(async move {
            let (stream, peer) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            handle_connection(ws, peer, settings).await;
        });

        let (mut client, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .unwrap();

        let mut texts = Vec::new();
        while texts.len() < 3 {
            let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
                .await
                .expect("timed out")
                .expect("stream ended")
                .unwrap();
            if let Message::Text(text) = frame {
                texts.push(text.as_str().to_owned());
            }
        }

        assert!(texts[0].contains(r#""type":"system""#));
        for text in &texts[1..] {
            assert!(
                text.contains(r#""type":"like""#) || text.contains(r#""type":"gift""#),
                "unexpected frame {text}"
            );
        }
        client.close(None).await.unwrap();
    }
}
