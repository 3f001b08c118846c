//! In-process session service for Line98.
//!
//! Wraps the rules engine with what a multi-user host needs: sessions keyed
//! by id, owner checks, one writer per session, optimistic revision checks,
//! idle expiry, structured logging and classified errors.

pub mod errors;
pub mod logging;
pub mod session;
pub mod settings;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{
    init_logging, init_logging_with, init_test_logging, try_init_logging_with, LogEntry,
    TestLogSubscriber,
};
pub use session::{
    GameSession, GameStateResponse, MoveResponse, SessionError, SessionId, SessionManager,
};
pub use settings::{AppSettings, SettingsError, SettingsStore};
