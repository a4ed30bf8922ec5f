//! WebSocket message types.
//!
//! Inbound (client → server):
//!
//! ```json
//! { "user": "Alice", "action": "on_connect", "payload": { "name": "Alice" } }
//! { "user": "Alice", "action": "button_press", "payload": null }
//! ```
//!
//! Outbound (server → every connection):
//!
//! ```json
//! { "type": "update", "latest_presses": ["Alice", "Bob"] }
//! { "type": "users", "connected_users": ["Alice", "Bob"] }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DisplayName;

pub const ACTION_ON_CONNECT: &str = "on_connect";
pub const ACTION_BUTTON_PRESS: &str = "button_press";

/// Outbound message type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Update,
    Users,
}

/// Current round broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMessage {
    pub r#type: MessageType,
    pub latest_presses: Vec<String>,
}

/// Identified users broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersMessage {
    pub r#type: MessageType,
    pub connected_users: Vec<String>,
}

/// Raw inbound message as sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientMessage {
    #[serde(default)]
    pub user: Option<String>,
    pub action: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// Payload of `on_connect`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnConnectPayload {
    pub name: String,
}

/// Decoded client action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// `on_connect`: register `payload.name` for this connection
    Identify(DisplayName),
    /// `button_press`: record the declared `user`
    Press(DisplayName),
    /// Any other action value
    Unknown(String),
}

/// Inbound message that cannot be turned into a [`ClientAction`]
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid message structure: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("'{action}' requires a payload with a 'name' field")]
    MissingName { action: String },

    #[error("'{action}' requires a 'user' field")]
    MissingUser { action: String },
}
