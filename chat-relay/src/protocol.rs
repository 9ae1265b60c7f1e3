//! Chat wire protocol
//!
//! Every frame is one JSON object with a `type` discriminator.
//!
//! Client to server:
//! - `{"type": "join", "room": "<room>"}`
//! - `{"type": "chat", "message": "<text>"}`
//!
//! Server to client:
//! - `{"type": "system", "message": "Joined room: <room>"}`
//! - `{"type": "chat", "room": "<room>", "message": "<text>"}`
//! - `{"type": "error", "message": "Invalid message format"}`

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Join { room: String },
    Chat { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    System { message: String },
    Chat { room: String, message: String },
    Error { message: String },
}

impl ServerMessage {
    pub fn joined(room: &str) -> Self {
        ServerMessage::System {
            message: format!("Joined room: {}", room),
        }
    }

    pub fn invalid_format() -> Self {
        ServerMessage::Error {
            message: ProtocolError::InvalidFormat.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is not JSON at all
    #[error("Invalid message format")]
    InvalidFormat,
}

/// Parse a client frame
///
/// Malformed JSON is an error. Well-formed JSON that is not a known
/// message (unknown `type`, missing or non-string fields) yields `None`
/// and is ignored by the relay.
pub fn parse_client_message(text: &str) -> Result<Option<ClientMessage>, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| ProtocolError::InvalidFormat)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_messages() {
        assert_eq!(
            parse_client_message(r#"{"type": "join", "room": "lobby"}"#),
            Ok(Some(ClientMessage::Join {
                room: "lobby".to_string()
            }))
        );
        assert_eq!(
            parse_client_message(r#"{"type": "chat", "message": "hi", "extra": 1}"#),
            Ok(Some(ClientMessage::Chat {
                message: "hi".to_string()
            }))
        );
    }

    #[test]
    fn test_unknown_shapes_are_ignored() {
        assert_eq!(parse_client_message(r#"{"type": "leave"}"#), Ok(None));
        assert_eq!(parse_client_message(r#"{"type": "join", "room": 7}"#), Ok(None));
        assert_eq!(parse_client_message(r#"{"type": "chat"}"#), Ok(None));
        assert_eq!(parse_client_message("[1, 2]"), Ok(None));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert_eq!(
            parse_client_message("{type: join"),
            Err(ProtocolError::InvalidFormat)
        );
        assert_eq!(parse_client_message(""), Err(ProtocolError::InvalidFormat));
    }

    #[test]
    fn test_server_message_json() {
        assert_eq!(
            serde_json::to_value(ServerMessage::joined("lobby")).unwrap(),
            json!({"type": "system", "message": "Joined room: lobby"})
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::Chat {
                room: "lobby".to_string(),
                message: "hi".to_string()
            })
            .unwrap(),
            json!({"type": "chat", "room": "lobby", "message": "hi"})
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::invalid_format()).unwrap(),
            json!({"type": "error", "message": "Invalid message format"})
        );
    }
}
