//! Transport seam between the connection loop and the socket library.
//!
//! The loop only sees [`Connector`] and [`FrameStream`], so tests can script
//! connection outcomes without a network.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use kickstream_common::TransportError;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;

/// Close code for an intentional shutdown by the peer.
pub const NORMAL_CLOSURE: u16 = 1000;
/// Close code recorded when the stream ends without a close frame.
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// A frame as seen by the connection loop. Control frames other than close
/// are handled inside the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFrame {
    Text(String),
    Binary(Vec<u8>),
    Close(Option<u16>),
}

/// Opens streams to a feed endpoint.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn FrameStream>, TransportError>;
}

/// An open, readable feed connection.
#[async_trait]
pub trait FrameStream: Send {
    /// Next frame, or `None` once the stream has ended.
    async fn next_frame(&mut self) -> Option<Result<TransportFrame, TransportError>>;

    /// Close the stream. Closing an already closed stream is not an error.
    async fn close(&mut self) -> Result<(), TransportError>;
}

// ---------------------------------------------------------------------------
// tokio-tungstenite
// ---------------------------------------------------------------------------

/// Connector backed by `tokio_tungstenite::connect_async`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn FrameStream>, TransportError> {
        let (ws, response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        debug!(status = %response.status(), "websocket handshake complete");
        Ok(Box::new(WsFrameStream { ws }))
    }
}

struct WsFrameStream {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FrameStream for WsFrameStream {
    async fn next_frame(&mut self) -> Option<Result<TransportFrame, TransportError>> {
        loop {
            let msg = match self.ws.next().await? {
                Ok(msg) => msg,
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return None,
                Err(e) => return Some(Err(TransportError::Protocol(e.to_string()))),
            };

            match msg {
                WsMessage::Text(text) => {
                    return Some(Ok(TransportFrame::Text(text.as_str().to_owned())));
                }
                WsMessage::Binary(data) => {
                    return Some(Ok(TransportFrame::Binary(data.to_vec())));
                }
                WsMessage::Close(frame) => {
                    return Some(Ok(TransportFrame::Close(
                        frame.map(|f| u16::from(f.code)),
                    )));
                }
                WsMessage::Ping(payload) => {
                    if let Err(e) = self.ws.send(WsMessage::Pong(payload)).await {
                        return Some(Err(TransportError::Protocol(e.to_string())));
                    }
                }
                WsMessage::Pong(_) | WsMessage::Frame(_) => {}
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        match self.ws.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(TransportError::Protocol(e.to_string())),
        }
    }
}
