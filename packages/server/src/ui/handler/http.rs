//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{MessageResponseDto, RoundDto, SessionStateDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<MessageResponseDto> {
    Json(MessageResponseDto::new("Buzzline server is running!"))
}

/// Close the current round and move it to the history.
///
/// Both outcomes are `200 OK`; only the message differs.
pub async fn save_to_history(State(state): State<Arc<AppState>>) -> Json<MessageResponseDto> {
    let outcome = state.close_round_usecase.execute().await;
    tracing::info!("Save to history requested: {}", outcome.message());
    Json(MessageResponseDto::new(outcome.message()))
}

/// List the saved rounds, oldest first
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<RoundDto>> {
    let rounds = state.get_history_usecase.execute().await;

    // Domain Model から DTO への変換
    let rounds = rounds
        .iter()
        .enumerate()
        .map(|(index, round)| RoundDto::from_round(index, round))
        .collect();

    Json(rounds)
}

/// Debug endpoint to get the current session state
pub async fn debug_session_state(State(state): State<Arc<AppState>>) -> Json<SessionStateDto> {
    let snapshot = state.get_session_state_usecase.execute().await;
    Json(SessionStateDto {
        live_connections: snapshot.live_connections,
        connected_users: snapshot
            .users
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
        latest_presses: snapshot
            .current_round
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
        saved_rounds: snapshot.saved_rounds,
    })
}
