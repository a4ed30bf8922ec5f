//! Conversion logic between DTOs and domain types.

use buzzline_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{DisplayName, Notification, Round};

use super::{
    http::RoundDto,
    websocket::{
        self as dto, ACTION_BUTTON_PRESS, ACTION_ON_CONNECT, ClientAction, ProtocolError,
    },
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientMessage> for ClientAction {
    type Error = ProtocolError;

    fn try_from(message: dto::ClientMessage) -> Result<Self, Self::Error> {
        match message.action.as_str() {
            ACTION_ON_CONNECT => {
                let payload = message
                    .payload
                    .filter(|value| !value.is_null())
                    .and_then(|value| serde_json::from_value::<dto::OnConnectPayload>(value).ok())
                    .ok_or_else(|| ProtocolError::MissingName {
                        action: message.action.clone(),
                    })?;
                Ok(ClientAction::Identify(DisplayName::new(payload.name)))
            }
            ACTION_BUTTON_PRESS => {
                let user = message.user.ok_or_else(|| ProtocolError::MissingUser {
                    action: message.action.clone(),
                })?;
                Ok(ClientAction::Press(DisplayName::new(user)))
            }
            _ => Ok(ClientAction::Unknown(message.action)),
        }
    }
}

/// Parse one inbound text frame into a client action
pub fn parse_client_action(text: &str) -> Result<ClientAction, ProtocolError> {
    let message = serde_json::from_str::<dto::ClientMessage>(text)?;
    ClientAction::try_from(message)
}

// ========================================
// Domain → DTO
// ========================================

fn names_to_strings(names: &[DisplayName]) -> Vec<String> {
    names.iter().map(|name| name.as_str().to_string()).collect()
}

/// Encode a notification into the JSON text frame sent to clients
pub fn encode_notification(notification: &Notification) -> Result<String, serde_json::Error> {
    match notification {
        Notification::RoundUpdated(presses) => serde_json::to_string(&dto::UpdateMessage {
            r#type: dto::MessageType::Update,
            latest_presses: names_to_strings(presses),
        }),
        Notification::UsersChanged(users) => serde_json::to_string(&dto::UsersMessage {
            r#type: dto::MessageType::Users,
            connected_users: names_to_strings(users),
        }),
    }
}

impl RoundDto {
    /// `index` is the 0-based position in the history
    pub fn from_round(index: usize, round: &Round) -> Self {
        Self {
            round: index + 1,
            presses: names_to_strings(&round.presses),
            saved_at: timestamp_to_jst_rfc3339(round.closed_at.value()),
        }
    }
}
