use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::config::GameConfig;
use crate::domain::PlayerKey;
use crate::error::AppError;
use crate::ws::session::{EventSink, GameSession};

/// Registry of independent game sessions. Each session sits behind its own
/// lock, so work on one session never waits for another.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<Mutex<GameSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Open a new session delivering through `sink`.
    pub fn create(&self, config: GameConfig, sink: Arc<dyn EventSink>) -> Uuid {
        let id = Uuid::new_v4();
        let session = GameSession::new(config, sink);
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(session_id = %id, "session created");
        id
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Mutex<GameSession>>, AppError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Result<R, AppError> {
        let session = self.get(id)?;
        let mut guard = session.lock();
        Ok(f(&mut *guard))
    }

    pub fn connect(&self, id: Uuid) -> Result<PlayerKey, AppError> {
        self.with_session(id, |session| session.connect())?
    }

    /// Route a raw JSON intent to a seat of a session.
    pub fn dispatch(&self, id: Uuid, who: PlayerKey, raw: &str) -> Result<(), AppError> {
        self.with_session(id, |session| session.handle_json(who, raw))
    }

    /// Free a seat; the session is dropped once nobody is connected.
    pub fn disconnect(&self, id: Uuid, who: PlayerKey) -> Result<(), AppError> {
        let now_empty = self.with_session(id, |session| {
            session.disconnect(who);
            session.is_empty()
        })?;
        if now_empty {
            self.remove(id);
        }
        Ok(())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "session closed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
