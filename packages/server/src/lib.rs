//! Buzzline: real-time party-game press session server.
//!
//! Clients connect over WebSocket, identify themselves with a display name and
//! press a shared buzzer. The server keeps the ordered presses of the current
//! round plus a history of saved rounds, and broadcasts every change to all
//! connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
