//! Server state shared by every handler.

use std::sync::Arc;

use tokio::sync::watch;

use crate::usecase::{
    CloseRoundUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase,
    GetSessionStateUseCase, IdentifyUserUseCase, RecordPressUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub identify_user_usecase: Arc<IdentifyUserUseCase>,
    pub record_press_usecase: Arc<RecordPressUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub close_round_usecase: Arc<CloseRoundUseCase>,
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    pub get_session_state_usecase: Arc<GetSessionStateUseCase>,
    /// `true` once the server is shutting down; every connection handler watches it
    pub shutdown: watch::Receiver<bool>,
}
