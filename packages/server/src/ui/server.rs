//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    CloseRoundUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase,
    GetSessionStateUseCase, IdentifyUserUseCase, RecordPressUseCase,
};

use super::{
    handler::{
        debug_session_state, get_history, health_check, save_to_history, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Party-game session server
///
/// This struct encapsulates the use cases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     identify_user_usecase,
///     record_press_usecase,
///     disconnect_client_usecase,
///     close_round_usecase,
///     get_history_usecase,
///     get_session_state_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 6969).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（接続受付のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// IdentifyUserUseCase（表示名登録のユースケース）
    identify_user_usecase: Arc<IdentifyUserUseCase>,
    /// RecordPressUseCase（プレス記録のユースケース）
    record_press_usecase: Arc<RecordPressUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// CloseRoundUseCase（ラウンド保存のユースケース）
    close_round_usecase: Arc<CloseRoundUseCase>,
    /// GetHistoryUseCase（履歴取得のユースケース）
    get_history_usecase: Arc<GetHistoryUseCase>,
    /// GetSessionStateUseCase（セッション状態取得のユースケース）
    get_session_state_usecase: Arc<GetSessionStateUseCase>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        identify_user_usecase: Arc<IdentifyUserUseCase>,
        record_press_usecase: Arc<RecordPressUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        close_round_usecase: Arc<CloseRoundUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        get_session_state_usecase: Arc<GetSessionStateUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            identify_user_usecase,
            record_press_usecase,
            disconnect_client_usecase,
            close_round_usecase,
            get_history_usecase,
            get_session_state_usecase,
        }
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 6969)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Buzzline server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/<your name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// After `shutdown` resolves no new connection is accepted, every open
    /// WebSocket goes through the regular disconnect path, and this returns
    /// once all of them have finished flushing.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let shutdown_tx = Arc::new(shutdown_tx);

        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            identify_user_usecase: self.identify_user_usecase,
            record_press_usecase: self.record_press_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            close_round_usecase: self.close_round_usecase,
            get_history_usecase: self.get_history_usecase,
            get_session_state_usecase: self.get_session_state_usecase,
            shutdown: shutdown_rx,
        });

        let notify = shutdown_tx.clone();
        axum::serve(listener, router(app_state))
            .with_graceful_shutdown(async move {
                shutdown.await;
                notify.send_replace(true);
            })
            .await?;

        // Every handler holds a receiver through the app state.
        shutdown_tx.closed().await;
        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // HTTP エンドポイント
        .route("/", get(health_check))
        .route("/save_to_history", post(save_to_history))
        .route("/api/history", get(get_history))
        .route("/debug/session", get(debug_session_state))
        // WebSocket エンドポイント
        .route("/{user_name}", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
