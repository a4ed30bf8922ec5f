//! UseCase 層
//!
//! プロトコルの各遷移（接続・識別・プレス・切断）と管理操作をユースケースとして実装します。
//! 状態を変更してブロードキャストするユースケースは、全て `SessionNotifier` のロックの中で
//! 「変更 → スナップショット → 送信」を行います。

mod close_round;
mod connect_client;
mod disconnect_client;
mod error;
mod get_history;
mod get_session_state;
mod identify_user;
mod notifier;
mod record_press;

pub use close_round::{CloseRoundOutcome, CloseRoundUseCase};
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::RecordPressError;
pub use get_history::GetHistoryUseCase;
pub use get_session_state::{GetSessionStateUseCase, SessionSnapshot};
pub use identify_user::IdentifyUserUseCase;
pub use notifier::{SessionGuard, SessionNotifier};
pub use record_press::RecordPressUseCase;
