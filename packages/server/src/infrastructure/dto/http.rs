//! HTTP API response bodies.

use serde::{Deserialize, Serialize};

/// Plain acknowledgement (`GET /`, `POST /save_to_history`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

impl MessageResponseDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One saved round (`GET /api/history`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDto {
    /// 1-based round number
    pub round: usize,
    pub presses: Vec<String>,
    /// RFC 3339 (JST)
    pub saved_at: String,
}

/// Snapshot of the whole session (`GET /debug/session`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStateDto {
    pub live_connections: usize,
    pub connected_users: Vec<String>,
    pub latest_presses: Vec<String>,
    pub saved_rounds: usize,
}
