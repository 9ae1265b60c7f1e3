//! End-to-end tests for the chat relay over real WebSocket connections

use std::net::SocketAddr;
use std::time::Duration;

use chat_relay::{build_router, RelayState};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(RelayState::new()))
            .await
            .unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr, path: &str) -> Client {
    let (client, _) = connect_async(format!("ws://{}{}", addr, path)).await.unwrap();
    client
}

async fn send_json(client: &mut Client, value: Value) {
    client.send(Message::text(value.to_string())).await.unwrap();
}

async fn recv_json(client: &mut Client) -> Value {
    loop {
        let frame = timeout(Duration::from_secs(2), client.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .unwrap();
        if frame.is_text() {
            return serde_json::from_str(frame.to_text().unwrap()).unwrap();
        }
    }
}

async fn assert_silent(client: &mut Client) {
    let result = timeout(Duration::from_millis(200), client.next()).await;
    assert!(result.is_err(), "expected no frame, got {:?}", result);
}

async fn join(client: &mut Client, room: &str) {
    send_json(client, json!({"type": "join", "room": room})).await;
    let reply = recv_json(client).await;
    assert_eq!(
        reply,
        json!({"type": "system", "message": format!("Joined room: {}", room)})
    );
}

#[tokio::test]
async fn test_join_gets_system_reply() {
    let addr = spawn_server().await;
    let mut client = connect(addr, "/").await;

    join(&mut client, "lobby").await;
}

#[tokio::test]
async fn test_chat_reaches_room_members_and_sender() {
    let addr = spawn_server().await;
    let mut alice = connect(addr, "/").await;
    let mut bob = connect(addr, "/ws").await;

    join(&mut alice, "lobby").await;
    join(&mut bob, "lobby").await;

    send_json(&mut alice, json!({"type": "chat", "message": "hello"})).await;

    let expected = json!({"type": "chat", "room": "lobby", "message": "hello"});
    assert_eq!(recv_json(&mut alice).await, expected);
    assert_eq!(recv_json(&mut bob).await, expected);
}

#[tokio::test]
async fn test_chat_does_not_cross_rooms() {
    let addr = spawn_server().await;
    let mut alice = connect(addr, "/").await;
    let mut carol = connect(addr, "/").await;

    join(&mut alice, "lobby").await;
    join(&mut carol, "kitchen").await;

    send_json(&mut alice, json!({"type": "chat", "message": "hello"})).await;

    assert_eq!(
        recv_json(&mut alice).await,
        json!({"type": "chat", "room": "lobby", "message": "hello"})
    );
    assert_silent(&mut carol).await;
}

#[tokio::test]
async fn test_rejoin_moves_connection() {
    let addr = spawn_server().await;
    let mut alice = connect(addr, "/").await;
    let mut bob = connect(addr, "/").await;

    join(&mut alice, "lobby").await;
    join(&mut bob, "lobby").await;
    join(&mut bob, "kitchen").await;

    send_json(&mut alice, json!({"type": "chat", "message": "still here?"})).await;

    recv_json(&mut alice).await;
    assert_silent(&mut bob).await;
}

#[tokio::test]
async fn test_malformed_frame_gets_error() {
    let addr = spawn_server().await;
    let mut client = connect(addr, "/").await;

    client.send(Message::text("{not json")).await.unwrap();

    assert_eq!(
        recv_json(&mut client).await,
        json!({"type": "error", "message": "Invalid message format"})
    );
}

#[tokio::test]
async fn test_chat_before_join_is_ignored() {
    let addr = spawn_server().await;
    let mut client = connect(addr, "/").await;

    send_json(&mut client, json!({"type": "chat", "message": "anyone?"})).await;
    assert_silent(&mut client).await;

    // Connection stays usable
    join(&mut client, "lobby").await;
}

#[tokio::test]
async fn test_disconnect_leaves_room_usable() {
    let addr = spawn_server().await;
    let mut alice = connect(addr, "/").await;
    let mut bob = connect(addr, "/").await;

    join(&mut alice, "lobby").await;
    join(&mut bob, "lobby").await;

    bob.close(None).await.unwrap();
    drop(bob);
    tokio::time::sleep(Duration::from_millis(100)).await;

    send_json(&mut alice, json!({"type": "chat", "message": "bye bob"})).await;
    assert_eq!(
        recv_json(&mut alice).await,
        json!({"type": "chat", "room": "lobby", "message": "bye bob"})
    );
}
