//! Per-connection WebSocket session
//!
//! Each connection gets an id and an outbound queue. A writer task drains
//! the queue into the socket while the reader loop dispatches incoming
//! frames against the shared [`RoomRegistry`].

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::protocol::{parse_client_message, ClientMessage, ServerMessage};
use crate::rooms::{ConnectionId, Outbound, RoomRegistry};

/// Drive one WebSocket connection until it closes
pub async fn run_session(socket: WebSocket, rooms: Arc<RoomRegistry>) {
    let id = Uuid::new_v4();
    info!("Connection {} opened", id);

    let (mut sink, mut stream) = socket.split();
    let (outbound, mut queue) = mpsc::unbounded_channel::<ServerMessage>();

    let writer = tokio::spawn(async move {
        while let Some(message) = queue.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => dispatch(&rooms, id, &outbound, &text).await,
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => dispatch(&rooms, id, &outbound, &text).await,
                Err(_) => send(&outbound, ServerMessage::invalid_format()),
            },
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by axum
            Ok(_) => {}
            Err(e) => {
                debug!("Connection {} read error: {}", id, e);
                break;
            }
        }
    }

    rooms.leave(id).await;
    // Last sender gone: the writer drains what is queued and stops
    drop(outbound);
    let _ = writer.await;

    info!("Connection {} closed", id);
}

/// Handle one text frame from a connection
pub async fn dispatch(rooms: &RoomRegistry, id: ConnectionId, outbound: &Outbound, text: &str) {
    match parse_client_message(text) {
        Err(e) => {
            debug!("Connection {} sent malformed frame: {}", id, e);
            send(outbound, ServerMessage::invalid_format());
        }
        Ok(None) => debug!("Connection {} sent unrecognized message, ignored", id),
        Ok(Some(ClientMessage::Join { room })) => {
            rooms.join(id, &room, outbound.clone()).await;
            send(outbound, ServerMessage::joined(&room));
        }
        Ok(Some(ClientMessage::Chat { message })) => {
            if rooms.broadcast_chat(id, &message).await.is_none() {
                debug!("Connection {} chatted before joining a room, ignored", id);
            }
        }
    }
}

fn send(outbound: &Outbound, message: ServerMessage) {
    if outbound.send(message).is_err() {
        debug!("Outbound queue closed, message dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_join_replies_with_system_message() {
        let rooms = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        dispatch(&rooms, id, &tx, r#"{"type":"join","room":"lobby"}"#).await;

        assert_eq!(rx.try_recv().unwrap(), ServerMessage::joined("lobby"));
        assert_eq!(rooms.room_of(id).await.as_deref(), Some("lobby"));
    }

    #[tokio::test]
    async fn test_chat_echoes_to_sender() {
        let rooms = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        dispatch(&rooms, id, &tx, r#"{"type":"join","room":"lobby"}"#).await;
        dispatch(&rooms, id, &tx, r#"{"type":"chat","message":"hi"}"#).await;

        assert_eq!(rx.try_recv().unwrap(), ServerMessage::joined("lobby"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ServerMessage::Chat {
                room: "lobby".to_string(),
                message: "hi".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_frame_gets_error() {
        let rooms = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(&rooms, Uuid::new_v4(), &tx, "not json").await;

        assert_eq!(rx.try_recv().unwrap(), ServerMessage::invalid_format());
    }

    #[tokio::test]
    async fn test_chat_before_join_and_unknown_type_are_silent() {
        let rooms = RoomRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        dispatch(&rooms, id, &tx, r#"{"type":"chat","message":"hi"}"#).await;
        dispatch(&rooms, id, &tx, r#"{"type":"wave"}"#).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(rooms.room_count().await, 0);
    }
}
