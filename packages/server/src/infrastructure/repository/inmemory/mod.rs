//! インメモリ実装

mod session;

pub use session::{InMemorySessionRepository, SessionState};
