//! Domain layer: value objects, entities and the interfaces the use cases depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ConnectionRegistry, EventLog, Round};
pub use error::MessagePushError;
pub use message_pusher::{BroadcastReport, MessagePusher, Notification, PusherChannel};
pub use repository::SessionRepository;
pub use value_object::{ConnectionId, DisplayName, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
