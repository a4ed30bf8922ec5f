//! Party-game press session server.
//!
//! Clients connect to `ws://<host>:<port>/<name>`, identify themselves and press
//! the buzzer; every change is broadcast to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin buzzline-server
//! cargo run --bin buzzline-server -- --host 0.0.0.0 --port 6969
//! ```

use std::{collections::HashMap, sync::Arc};

use buzzline_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemorySessionRepository, inmemory::SessionState},
    },
    ui::Server,
    usecase::{
        CloseRoundUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase,
        GetSessionStateUseCase, IdentifyUserUseCase, RecordPressUseCase, SessionNotifier,
    },
};
use buzzline_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "buzzline-server")]
#[command(about = "Party-game press session server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "6969")]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory session state)
    let repository = Arc::new(InMemorySessionRepository::new(Arc::new(Mutex::new(
        SessionState::default(),
    ))));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Create UseCases
    let notifier = Arc::new(SessionNotifier::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let identify_user_usecase = Arc::new(IdentifyUserUseCase::new(
        repository.clone(),
        notifier.clone(),
    ));
    let record_press_usecase = Arc::new(RecordPressUseCase::new(
        repository.clone(),
        notifier.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        notifier.clone(),
    ));
    let close_round_usecase = Arc::new(CloseRoundUseCase::new(
        repository.clone(),
        notifier.clone(),
        Arc::new(SystemClock),
    ));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(repository.clone()));
    let get_session_state_usecase = Arc::new(GetSessionStateUseCase::new(
        repository,
        message_pusher,
        notifier,
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        identify_user_usecase,
        record_press_usecase,
        disconnect_client_usecase,
        close_round_usecase,
        get_history_usecase,
        get_session_state_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
