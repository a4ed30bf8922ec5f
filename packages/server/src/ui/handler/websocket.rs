//! WebSocket connection handlers.
//!
//! Each connection runs two tasks:
//!
//! - the receive loop parses client actions and dispatches them to use cases
//! - the pusher loop writes broadcast messages from the connection's channel
//!   to the socket, in order
//!
//! Whichever way the connection ends (client close, socket error, server
//! shutdown) the same disconnect use case runs exactly once.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::{mpsc, watch};

use crate::{
    domain::ConnectionId,
    infrastructure::dto::{conversion::parse_client_action, websocket::ClientAction},
    ui::state::AppState,
};

/// `GET /{user_name}` with a WebSocket upgrade.
///
/// The path segment is only used for logging; the identity comes from the
/// `on_connect` payload.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
) -> impl IntoResponse {
    tracing::info!("WebSocket upgrade requested by '{}'", user_name);
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_name))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the socket rejects a write, or when every sender for `rx`
/// is gone and the queued messages have been flushed. In the latter case a
/// close frame is sent.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    // A dropped sender also means the server is going away.
    let _ = shutdown.wait_for(|stopping| *stopping).await;
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, path_name: String) {
    let (sender, receiver) = socket.split();

    // Connecting -> Connected-Unidentified
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(tx).await;
    tracing::info!(
        "Connection '{}' accepted (path name '{}')",
        connection_id,
        path_name
    );

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        connection_id,
        path_name.clone(),
    ));

    let send_task_finished = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => {
            recv_task.abort();
            true
        }
        _ = wait_for_shutdown(state.shutdown.clone()) => {
            tracing::info!("Closing connection '{}' for shutdown", connection_id);
            recv_task.abort();
            false
        }
    };

    // any state -> Closed
    match state
        .disconnect_client_usecase
        .execute(connection_id)
        .await
    {
        Some(name) => tracing::info!(
            "WebSocket from '{}' disconnected ({} removed)",
            path_name,
            name
        ),
        None => tracing::info!(
            "WebSocket from '{}' disconnected before identifying",
            path_name
        ),
    }

    // The channel sender is gone now; let the pusher loop flush what is queued.
    if !send_task_finished {
        let _ = send_task.await;
    }
}

async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    path_name: String,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let text = text.as_str();
                tracing::debug!("Received text from '{}': {}", connection_id, text);
                dispatch(&state, connection_id, &path_name, text).await;
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", connection_id);
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}

async fn dispatch(state: &AppState, connection_id: ConnectionId, path_name: &str, text: &str) {
    let action = match parse_client_action(text) {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!(
                "Ignoring malformed message from '{}': {}",
                connection_id,
                e
            );
            return;
        }
    };

    match action {
        ClientAction::Identify(name) => {
            if name.as_str() != path_name {
                tracing::debug!(
                    "Connection '{}' identified as '{}' but connected as '{}'",
                    connection_id,
                    name,
                    path_name
                );
            }
            tracing::info!("{} connected", name);
            state
                .identify_user_usecase
                .execute(connection_id, name)
                .await;
        }
        ClientAction::Press(user) => {
            match state
                .record_press_usecase
                .execute(connection_id, user)
                .await
            {
                Ok(round) => tracing::debug!("Round now has {} press(es)", round.len()),
                Err(e) => tracing::warn!("Ignoring press: {}", e),
            }
        }
        ClientAction::Unknown(action) => {
            tracing::warn!("Unknown action from '{}': {}", connection_id, action);
        }
    }
}
