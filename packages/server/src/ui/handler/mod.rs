//! Request handlers.

mod http;
mod websocket;

pub use http::{debug_session_state, get_history, health_check, save_to_history};
pub use websocket::websocket_handler;
