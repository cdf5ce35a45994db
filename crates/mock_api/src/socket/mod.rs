//! Socket.IO endpoint for the sensors dashboard.
//!
//! Websocket transport only: the handshake, pings and the
//! `controlDataUpdate` fan-out all travel over one upgraded connection.

pub mod session;
pub mod telemetry;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

use self::session::{Session, Step, PING_INTERVAL_MS};
use crate::shared::state::AppState;
use crate::shared::store::new_id;

/// GET /socket.io/?EIO=4&transport=websocket
pub async fn socket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = Session::new(new_id());
    let mut updates = state.telemetry.subscribe();
    let sid = session.sid.clone();

    if sender.send(Message::Text(session.open_frame())).await.is_err() {
        tracing::debug!(sid = %sid, "socket gone before handshake");
        return;
    }
    tracing::info!(sid = %sid, "socket connected");

    let mut ping = tokio::time::interval(Duration::from_millis(PING_INTERVAL_MS));
    // first tick fires immediately
    ping.tick().await;

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::debug!(sid = %sid, error = %e, "socket receive error");
                        break;
                    }
                };
                match session.handle(&text) {
                    Step::Reply(frames) => {
                        let mut failed = false;
                        for frame in frames {
                            if sender.send(Message::Text(frame)).await.is_err() {
                                failed = true;
                                break;
                            }
                        }
                        if failed {
                            break;
                        }
                    }
                    Step::Close => break,
                }
            }
            update = updates.recv() => {
                match update {
                    Ok(update) => {
                        if !session.is_joined() {
                            continue;
                        }
                        if let Some(frame) = Session::update_frame(&update) {
                            if sender.send(Message::Text(frame)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(sid = %sid, skipped, "socket lagging, updates dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            _ = ping.tick() => {
                if sender.send(Message::Text(Session::ping_frame())).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = sender.close().await;
    tracing::info!(sid = %sid, "socket disconnected");
}
