//! WebSocket transport: accept loop and per-connection handler.
//!
//! Each connection gets an id and a bounded outbound queue. Inbound text
//! frames are parsed and handed to the coordinator in arrival order; when the
//! socket closes the coordinator runs its disconnect cleanup before the task
//! exits.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};
use tracing::{debug, info, warn};

use crate::coordinator::LifecycleCoordinator;
use crate::protocol::{ClientMessage, ServerMessage};

/// Accept connections forever, spawning a handler task for each.
pub async fn serve(
    listener: TcpListener,
    coordinator: Arc<LifecycleCoordinator>,
    outbound_buffer: usize,
) {
    if let Ok(addr) = listener.local_addr() {
        info!("sharecast-signal listening on {}", addr);
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move {
                    match accept_async(stream).await {
                        Ok(ws) => handle_connection(ws, addr, coordinator, outbound_buffer).await,
                        Err(e) => {
                            warn!(peer = %addr, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                warn!(error = %e, "TCP accept error");
            }
        }
    }
}

/// Drive a single WebSocket connection until it closes.
pub async fn handle_connection(
    ws: WebSocketStream<TcpStream>,
    addr: SocketAddr,
    coordinator: Arc<LifecycleCoordinator>,
    outbound_buffer: usize,
) {
    let (mut sink, mut stream) = ws.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(outbound_buffer.max(1));
    let id = coordinator.connect(tx).await;

    debug!(peer = %addr, connection = %id, "WS connection open");

    loop {
        tokio::select! {
            // Coordinator -> this client
            Some(msg) = rx.recv() => {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(connection = %id, event = msg.name(), error = %e, "failed to encode message");
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }

            // This client -> coordinator
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        match ClientMessage::parse(&text) {
                            Ok(msg) => coordinator.handle(&id, msg).await,
                            Err(e) => {
                                debug!(connection = %id, error = %e, "ignoring malformed message");
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(connection = %id, error = %e, "WS error");
                        break;
                    }
                    Some(Ok(_)) => {
                        debug!(connection = %id, "ignoring non-text frame");
                    }
                }
            }
        }
    }

    coordinator.disconnect(&id).await;
    debug!(peer = %addr, connection = %id, "WS connection closed");
}
