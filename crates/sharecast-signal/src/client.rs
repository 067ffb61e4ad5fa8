//! Minimal signaling client, used by endpoints and by the end-to-end tests.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use sharecast_common::{Result, SharecastError};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::protocol::{ClientMessage, ServerMessage};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct SignalClient {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

impl SignalClient {
    /// Open a WebSocket to the coordinator at `url` (e.g. `ws://127.0.0.1:3000`).
    pub async fn connect(url: &str) -> Result<Self> {
        let (ws, _) = connect_async(url)
            .await
            .map_err(|e| SharecastError::Network(format!("connect to {url} failed: {e}")))?;
        let (sink, stream) = ws.split();
        Ok(Self { sink, stream })
    }

    pub async fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        let json = serde_json::to_string(msg)
            .map_err(|e| SharecastError::Other(format!("failed to encode {}: {e}", msg.name())))?;
        self.sink
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| SharecastError::Network(e.to_string()))
    }

    /// Next message from the coordinator, or `None` once the socket closes.
    ///
    /// Frames that are not valid server messages are skipped.
    pub async fn recv(&mut self) -> Option<ServerMessage> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                    Ok(msg) => return Some(msg),
                    Err(e) => debug!(error = %e, "skipping unparseable server frame"),
                },
                Ok(Message::Close(_)) => return None,
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "WS error");
                    return None;
                }
            }
        }
        None
    }

    pub async fn close(mut self) -> Result<()> {
        self.sink
            .close()
            .await
            .map_err(|e| SharecastError::Network(e.to_string()))
    }
}
