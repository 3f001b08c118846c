use crate::errors::{ErrorSeverity, IntoErrorResponse};
use crate::settings::{AppSettings, SettingsError, SettingsStore};
use chrono::{SecondsFormat, Utc};
use line98_ai::{create_advisor_with_seed, AdvisorError, Hint, HintAdvisor};
use line98_engine::engine::{Engine, MoveOutcome};
use line98_engine::errors::MoveError;
use line98_engine::game::{GameStatus, OwnerId, Session};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

pub type SessionId = String;

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Owns every live session and serializes writers per session.
///
/// The map lock is only held to look up, insert or remove an entry. Each
/// session has its own mutex that is held across a whole move, so at most one
/// move per session is in flight while different sessions proceed in
/// parallel.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<GameSession>>>,
    policy: Policy,
}

/// Where the hint advisor and the idle timeout come from.
enum Policy {
    Fixed {
        advisor: Arc<dyn HintAdvisor>,
        ttl: Duration,
    },
    /// Read from the store on every call; the advisor is rebuilt when its
    /// name or seed changes.
    Live {
        store: Arc<SettingsStore>,
        advisor: RwLock<LiveAdvisor>,
    },
}

struct LiveAdvisor {
    name: String,
    seed: u64,
    advisor: Arc<dyn HintAdvisor>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("SessionManager");
        match &self.policy {
            Policy::Fixed { advisor, ttl } => d
                .field("advisor", &advisor.name())
                .field("session_ttl", ttl),
            Policy::Live { store, .. } => d.field("settings", &store.get().ok()),
        };
        d.finish()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_advisor(Box::new(line98_ai::greedy::GreedyAdvisor::new()), ttl)
    }

    /// Manager with a fixed advisor and timeout.
    pub fn with_advisor(advisor: Box<dyn HintAdvisor>, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            policy: Policy::Fixed {
                advisor: Arc::from(advisor),
                ttl,
            },
        }
    }

    /// Manager backed by a private store seeded with `settings`.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SessionError> {
        create_advisor_with_seed(&settings.advisor, settings.hint_seed)?;
        let store = SettingsStore::with_settings(settings.clone())?;
        Self::with_settings_store(Arc::new(store))
    }

    /// Manager that follows `store`: updates to the timeout, advisor or hint
    /// seed apply to live sessions from the next call on.
    pub fn with_settings_store(store: Arc<SettingsStore>) -> Result<Self, SessionError> {
        let settings = store.get()?;
        let advisor = create_advisor_with_seed(&settings.advisor, settings.hint_seed)?;
        Ok(Self {
            sessions: RwLock::new(HashMap::new()),
            policy: Policy::Live {
                store,
                advisor: RwLock::new(LiveAdvisor {
                    name: settings.advisor,
                    seed: settings.hint_seed,
                    advisor: Arc::from(advisor),
                }),
            },
        })
    }

    /// The store this manager follows, if any.
    pub fn settings(&self) -> Option<&Arc<SettingsStore>> {
        match &self.policy {
            Policy::Fixed { .. } => None,
            Policy::Live { store, .. } => Some(store),
        }
    }

    pub fn session_ttl(&self) -> Result<Duration, SessionError> {
        match &self.policy {
            Policy::Fixed { ttl, .. } => Ok(*ttl),
            Policy::Live { store, .. } => Ok(store.get()?.session_ttl()),
        }
    }

    fn advisor(&self) -> Result<Arc<dyn HintAdvisor>, SessionError> {
        let (store, live) = match &self.policy {
            Policy::Fixed { advisor, .. } => return Ok(Arc::clone(advisor)),
            Policy::Live { store, advisor } => (store, advisor),
        };
        let settings = store.get()?;
        {
            let current = live.read().map_err(|_| SessionError::StoragePoisoned)?;
            if current.name == settings.advisor && current.seed == settings.hint_seed {
                return Ok(Arc::clone(&current.advisor));
            }
        }

        let rebuilt: Arc<dyn HintAdvisor> =
            Arc::from(create_advisor_with_seed(&settings.advisor, settings.hint_seed)?);
        let mut slot = live.write().map_err(|_| SessionError::StoragePoisoned)?;
        tracing::info!(
            advisor = rebuilt.name(),
            hint_seed = settings.hint_seed,
            "advisor rebuilt from settings"
        );
        *slot = LiveAdvisor {
            name: settings.advisor,
            seed: settings.hint_seed,
            advisor: Arc::clone(&rebuilt),
        };
        Ok(rebuilt)
    }

    pub fn create_session(&self, owner: impl Into<OwnerId>) -> Result<SessionId, SessionError> {
        self.create_session_with_seed(owner, None)
    }

    /// New game for `owner`; `seed` fixes the spawn sequence.
    pub fn create_session_with_seed(
        &self,
        owner: impl Into<OwnerId>,
        seed: Option<u64>,
    ) -> Result<SessionId, SessionError> {
        let mut engine = Engine::new(seed);
        let session = engine.create_session(owner);
        self.insert(engine, session)
    }

    /// Register a previously persisted session under a fresh id.
    pub fn restore_session(
        &self,
        session: Session,
        seed: Option<u64>,
    ) -> Result<SessionId, SessionError> {
        self.insert(Engine::new(seed), session)
    }

    fn insert(&self, engine: Engine, session: Session) -> Result<SessionId, SessionError> {
        let id = Uuid::new_v4().to_string();

        tracing::info!(
            session_id = %id,
            owner = %session.owner_id(),
            seed = ?engine.seed(),
            status = ?session.status(),
            "creating game session"
        );

        let entry = Arc::new(GameSession::new(id.clone(), engine, session));
        let mut guard = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard.insert(id.clone(), entry);
        Ok(id)
    }

    pub fn get_session(&self, id: &SessionId) -> Result<Arc<GameSession>, SessionError> {
        let guard = self
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    /// Live session by id, expiring it first if it has been idle too long.
    ///
    /// Does not refresh the idle timer; only the owner's move and hint
    /// calls do, after authorization.
    fn live_session(&self, session_id: &SessionId) -> Result<Arc<GameSession>, SessionError> {
        let session = self.get_session(session_id)?;
        if session.is_expired(self.session_ttl()?) {
            self.expire_session(session_id)?;
            return Err(SessionError::Expired(session_id.clone()));
        }
        Ok(session)
    }

    /// Current state; no owner is required to read it.
    pub fn state(&self, session_id: &SessionId) -> Result<GameStateResponse, SessionError> {
        let session = self.live_session(session_id)?;
        let slot = session.lock()?;
        Ok(session.state_of(&slot))
    }

    /// Apply a move on behalf of `owner`.
    ///
    /// With `expected_revision` set, the move is only applied if the session
    /// is still at that revision. A move that fills the board on spawn comes
    /// back as [`SessionError::GameOver`]; the moved ball and the finished
    /// status are committed even so.
    pub fn apply_move(
        &self,
        session_id: &SessionId,
        owner: &OwnerId,
        from: usize,
        to: usize,
        expected_revision: Option<u64>,
    ) -> Result<MoveResponse, SessionError> {
        let session = self.live_session(session_id)?;
        let mut slot = session.lock()?;

        if !slot.session.is_owned_by(owner) {
            return Err(SessionError::NotOwner(session_id.clone()));
        }
        session.touch();
        if let Some(expected) = expected_revision {
            if expected != slot.revision {
                tracing::warn!(
                    session_id = %session_id,
                    expected,
                    actual = slot.revision,
                    "revision conflict"
                );
                return Err(SessionError::RevisionConflict {
                    expected,
                    actual: slot.revision,
                });
            }
        }

        let SessionSlot {
            engine,
            session: game,
            revision,
        } = &mut *slot;
        match engine.apply_move(game, from, to) {
            Ok(outcome) => {
                *revision += 1;
                tracing::debug!(
                    session_id = %session_id,
                    from,
                    to,
                    cleared = outcome.gained,
                    score = game.score(),
                    revision = *revision,
                    "move committed"
                );
                if outcome.finished {
                    tracing::info!(session_id = %session_id, score = game.score(), "game finished");
                }
                Ok(MoveResponse {
                    outcome,
                    state: session.state_of(&slot),
                })
            }
            Err(err) if err.is_terminal() => {
                *revision += 1;
                tracing::info!(
                    session_id = %session_id,
                    score = game.score(),
                    error = %err,
                    "game over on spawn"
                );
                Err(SessionError::GameOver {
                    state: Box::new(session.state_of(&slot)),
                })
            }
            Err(err) => {
                tracing::debug!(session_id = %session_id, from, to, error = %err, "move rejected");
                Err(SessionError::Rejected(err))
            }
        }
    }

    /// Best move for `owner`, or `None` once the game is over.
    ///
    /// The advisor runs on a snapshot taken under the session lock, so a long
    /// scan never holds up writers.
    pub fn hint(&self, session_id: &SessionId, owner: &OwnerId) -> Result<Option<Hint>, SessionError> {
        let session = self.live_session(session_id)?;
        let snapshot = {
            let slot = session.lock()?;
            if !slot.session.is_owned_by(owner) {
                return Err(SessionError::NotOwner(session_id.clone()));
            }
            session.touch();
            slot.session.clone()
        };

        let advisor = self.advisor()?;
        let hint = advisor.suggest(&snapshot);
        tracing::debug!(
            session_id = %session_id,
            advisor = advisor.name(),
            hint = ?hint,
            "hint computed"
        );
        Ok(hint)
    }

    pub fn delete_session(&self, session_id: &SessionId) -> Result<(), SessionError> {
        match self.remove_session(session_id)? {
            Some(_) => {
                tracing::info!(session_id = %session_id, "session deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.clone())),
        }
    }

    /// Drop every idle session; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let Ok(ttl) = self.session_ttl() else {
            return 0;
        };
        let mut expired = Vec::new();
        {
            let mut guard = match self.sessions.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|id, session| {
                if session.is_expired(ttl) {
                    expired.push(id.clone());
                    false
                } else {
                    true
                }
            });
        }

        for id in &expired {
            tracing::info!(session_id = %id, "session expired");
        }
        expired.len()
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        match self.sessions.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn advisor_name(&self) -> Result<String, SessionError> {
        Ok(self.advisor()?.name().to_string())
    }

    fn expire_session(&self, session_id: &SessionId) -> Result<(), SessionError> {
        if self.remove_session(session_id)?.is_some() {
            tracing::info!(session_id = %session_id, "session expired");
        }
        Ok(())
    }

    fn remove_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Arc<GameSession>>, SessionError> {
        match self.sessions.write() {
            Ok(mut guard) => Ok(guard.remove(session_id)),
            Err(_) => Err(SessionError::StoragePoisoned),
        }
    }
}

struct SessionSlot {
    engine: Engine,
    session: Session,
    revision: u64,
}

/// One live game with its engine, guarded as a unit.
pub struct GameSession {
    id: SessionId,
    slot: Mutex<SessionSlot>,
    created_at: String,
    last_active: Mutex<Instant>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl GameSession {
    fn new(id: SessionId, engine: Engine, session: Session) -> Self {
        Self {
            id,
            slot: Mutex::new(SessionSlot {
                engine,
                session,
                revision: 0,
            }),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Copy of the game and its revision.
    pub fn snapshot(&self) -> Result<(Session, u64), SessionError> {
        let slot = self.lock()?;
        Ok((slot.session.clone(), slot.revision))
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionSlot>, SessionError> {
        self.slot.lock().map_err(|_| SessionError::StoragePoisoned)
    }

    fn state_of(&self, slot: &SessionSlot) -> GameStateResponse {
        let game = &slot.session;
        GameStateResponse {
            session_id: self.id.clone(),
            owner_id: game.owner_id().clone(),
            board: game.board().to_string(),
            next_balls: game.spawn_queue().to_string(),
            score: game.score(),
            status: game.status(),
            revision: slot.revision,
            created_at: self.created_at.clone(),
        }
    }

    fn touch(&self) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = Instant::now();
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        match self.last_active.lock() {
            Ok(last) => last.elapsed() >= ttl,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
impl GameSession {
    fn force_last_active(&self, instant: Instant) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = instant;
        }
    }
}

/// Session state as handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateResponse {
    pub session_id: SessionId,
    pub owner_id: OwnerId,
    /// 81 symbols, `-` for an empty cell
    pub board: String,
    pub next_balls: String,
    pub score: u32,
    pub status: GameStatus,
    /// Number of committed mutations since the session was registered
    pub revision: u64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveResponse {
    pub outcome: MoveOutcome,
    pub state: GameStateResponse,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
    #[error("Session expired: {0}")]
    Expired(SessionId),
    #[error("Session {0} belongs to another owner")]
    NotOwner(SessionId),
    #[error("Move rejected: {0}")]
    Rejected(#[from] MoveError),
    /// The move was applied, then the spawn found no room. `state` is what
    /// was committed: the ball moved and the game is finished.
    #[error("Game over: board full")]
    GameOver { state: Box<GameStateResponse> },
    #[error("Revision conflict: expected {expected}, session is at {actual}")]
    RevisionConflict { expected: u64, actual: u64 },
    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}

impl IntoErrorResponse for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "session_not_found",
            SessionError::Expired(_) => "session_expired",
            SessionError::NotOwner(_) => "not_owner",
            SessionError::Rejected(err) => match err {
                MoveError::GameFinished => "game_finished",
                MoveError::OutOfRange { .. } => "out_of_range",
                MoveError::SelfMove { .. } => "self_move",
                MoveError::EmptySource { .. } => "empty_source",
                MoveError::OccupiedDestination { .. } => "occupied_destination",
                MoveError::NoPath { .. } => "no_path",
                MoveError::BoardFull { .. } => "board_full",
            },
            SessionError::GameOver { .. } => "board_full",
            SessionError::RevisionConflict { .. } => "revision_conflict",
            SessionError::Advisor(_) => "advisor_error",
            SessionError::Settings(_) => "settings_error",
            SessionError::StoragePoisoned => "session_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::NotFound(id) | SessionError::NotOwner(id) => {
                Some(serde_json::json!({ "session_id": id }))
            }
            SessionError::Expired(id) => Some(serde_json::json!({
                "session_id": id,
                "reason": "Session expired due to inactivity"
            })),
            SessionError::GameOver { state } => serde_json::to_value(state).ok(),
            SessionError::RevisionConflict { expected, actual } => Some(serde_json::json!({
                "expected": expected,
                "actual": actual
            })),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::StoragePoisoned
            | SessionError::Settings(SettingsError::StoragePoisoned) => ErrorSeverity::Critical,
            SessionError::Advisor(_) | SessionError::Settings(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
