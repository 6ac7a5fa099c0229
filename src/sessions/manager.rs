//! Session registry with idle expiry

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use super::game::GameSession;
use crate::{Error, Result, players::AgentFactory};

/// Idle time after which a session is dropped
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(5 * 60);

struct SessionEntry {
    session: GameSession,
    last_seen: Instant,
}

/// Thread-safe map from session id to game session.
///
/// Every operation takes the one internal lock, so a session is only ever
/// touched by one caller at a time.
///
/// # Examples
///
/// ```
/// use td_tictactoe::players::PlayerKind;
/// use td_tictactoe::sessions::SessionManager;
///
/// let manager = SessionManager::default();
/// let id = manager.new_session();
///
/// let info = manager.with_session(&id, |session| {
///     session.start_game(PlayerKind::Human, PlayerKind::Random)?;
///     session.make_human_move(4)
/// })?;
/// assert!(info.outcome.is_none());
/// # Ok::<(), td_tictactoe::Error>(())
/// ```
pub struct SessionManager {
    factory: AgentFactory,
    expire_after: Duration,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY)
    }
}

impl SessionManager {
    pub fn new(expire_after: Duration) -> Self {
        Self {
            factory: AgentFactory::default(),
            expire_after,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Build agents for new sessions with `factory`
    pub fn with_factory(mut self, factory: AgentFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn expire_after(&self) -> Duration {
        self.expire_after
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session and return its id
    pub fn new_session(&self) -> String {
        let mut sessions = self.sessions();
        let id = loop {
            let id = format!("{:032x}", rand::random::<u128>());
            if !sessions.contains_key(&id) {
                break id;
            }
        };

        sessions.insert(
            id.clone(),
            SessionEntry {
                session: GameSession::new(self.factory.clone()),
                last_seen: Instant::now(),
            },
        );
        log::debug!("created session {id}");
        id
    }

    /// Run `f` on the session registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if no such session exists, otherwise
    /// whatever `f` returns.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions();
        let entry = sessions.get_mut(id).ok_or_else(|| Error::UnknownSession {
            id: id.to_string(),
        })?;
        f(&mut entry.session)
    }

    /// Returns whether a session was removed
    pub fn delete_session(&self, id: &str) -> bool {
        self.sessions().remove(id).is_some()
    }

    /// Mark the session as active now. Returns whether it exists.
    pub fn refresh_session(&self, id: &str) -> bool {
        self.refresh_session_at(id, Instant::now())
    }

    pub fn refresh_session_at(&self, id: &str, now: Instant) -> bool {
        match self.sessions().get_mut(id) {
            Some(entry) => {
                entry.last_seen = now;
                true
            }
            None => false,
        }
    }

    /// Drop every session idle for at least the expiry time.
    ///
    /// Returns the number of sessions removed.
    pub fn expire_sessions(&self) -> usize {
        self.expire_sessions_at(Instant::now())
    }

    pub fn expire_sessions_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < self.expire_after);

        let removed = before - sessions.len();
        if removed > 0 {
            log::info!("expired {removed} idle sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }
}

/// Expire idle sessions of `manager` every `interval`, for as long as the
/// process runs.
pub fn spawn_expiry_thread(manager: Arc<SessionManager>, interval: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            manager.expire_sessions();
        }
    })
}
