//! Room registry
//!
//! Owns the mapping from room name to the connections currently in it.
//! Join and leave take the write lock; broadcast iterates under the read
//! lock, so a connection is never added or removed halfway through a
//! broadcast and a removed connection receives nothing afterwards.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::protocol::ServerMessage;

/// Identifies one WebSocket connection for its lifetime
pub type ConnectionId = Uuid;

/// Outbound queue of a connection, drained by its writer task
pub type Outbound = mpsc::UnboundedSender<ServerMessage>;

#[derive(Default)]
struct Rooms {
    members: HashMap<String, HashMap<ConnectionId, Outbound>>,
    /// Room each connection is currently in
    joined: HashMap<ConnectionId, String>,
}

impl Rooms {
    fn remove(&mut self, id: ConnectionId) -> Option<String> {
        let room = self.joined.remove(&id)?;
        if let Some(members) = self.members.get_mut(&room) {
            members.remove(&id);
            if members.is_empty() {
                self.members.remove(&room);
                debug!("Room {} is empty, dropped", room);
            }
        }
        Some(room)
    }
}

#[derive(Default)]
pub struct RoomRegistry {
    inner: RwLock<Rooms>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a connection into `room`, leaving its previous room
    ///
    /// Returns the room that was left, if any.
    pub async fn join(&self, id: ConnectionId, room: &str, outbound: Outbound) -> Option<String> {
        let mut rooms = self.inner.write().await;
        let previous = rooms.remove(id);

        rooms
            .members
            .entry(room.to_string())
            .or_default()
            .insert(id, outbound);
        rooms.joined.insert(id, room.to_string());

        info!("Connection {} joined room {}", id, room);
        previous
    }

    /// Remove a connection from its room; returns the room it was in
    pub async fn leave(&self, id: ConnectionId) -> Option<String> {
        let left = self.inner.write().await.remove(id);
        if let Some(room) = &left {
            info!("Connection {} left room {}", id, room);
        }
        left
    }

    /// Room a connection is currently in
    pub async fn room_of(&self, id: ConnectionId) -> Option<String> {
        self.inner.read().await.joined.get(&id).cloned()
    }

    /// Relay a chat message to every member of the sender's room, sender included
    ///
    /// Returns the room and the number of members reached, or `None` when the
    /// sender has not joined a room.
    pub async fn broadcast_chat(&self, sender: ConnectionId, message: &str) -> Option<(String, usize)> {
        let rooms = self.inner.read().await;
        let room = rooms.joined.get(&sender)?.clone();
        let payload = ServerMessage::Chat {
            room: room.clone(),
            message: message.to_string(),
        };

        let delivered = rooms
            .members
            .get(&room)
            .map(|members| {
                members
                    .values()
                    .filter(|outbound| outbound.send(payload.clone()).is_ok())
                    .count()
            })
            .unwrap_or(0);

        debug!("Relayed chat in {} to {} connections", room, delivered);
        Some((room, delivered))
    }

    /// Number of non-empty rooms
    pub async fn room_count(&self) -> usize {
        self.inner.read().await.members.len()
    }

    /// Number of connections in a room
    pub async fn member_count(&self, room: &str) -> usize {
        self.inner
            .read()
            .await
            .members
            .get(room)
            .map_or(0, HashMap::len)
    }
}
