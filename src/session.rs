//! Session state for Kaiwatore
//!
//! A session is a bounded conversational exchange identified by an opaque
//! id, holding an ordered, append-only turn history. Three turns are
//! produced per user message (user echo, bot reply, voice feedback) and
//! appended in that fixed order.
//!
//! The store is a process-wide in-memory map: sessions are created on
//! demand, mutated on every turn, and never deleted during normal
//! operation (they live until process restart). Concurrent requests for
//! the same session serialize on the store mutex per operation, but turn
//! interleaving across racing requests is not otherwise guaranteed.

use crate::error::{KaiwatoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Role of a turn in session history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The practicing user
    User,
    /// The in-character bot reply
    Bot,
    /// The coaching feedback ("voice")
    Voice,
}

/// One atomic message record in session history
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced this turn
    pub role: Role,
    /// Message text
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Creates a turn stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a bot turn
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content)
    }

    /// Creates a voice (coach) turn
    pub fn voice(content: impl Into<String>) -> Self {
        Self::new(Role::Voice, content)
    }
}

/// A conversation session
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque unique token
    pub id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Ordered turn history; insertion order is chronological order
    pub history: Vec<Turn>,
}

/// Process-wide session map
///
/// Cloneable handle over shared state; components receive a handle
/// rather than touching any global. There is deliberately no delete
/// operation: ended sessions remain readable until restart.
///
/// # Examples
///
/// ```
/// use kaiwatore::session::{SessionStore, Turn};
///
/// let store = SessionStore::new();
/// let session = store.create();
/// store
///     .append(&session.id, vec![Turn::user("こんにちは")])
///     .unwrap();
/// assert_eq!(store.history(&session.id).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new session with a fresh UUID and empty history
    ///
    /// # Returns
    ///
    /// Returns a snapshot of the created session
    pub fn create(&self) -> Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            history: Vec::new(),
        };

        let mut sessions = self.lock();
        sessions.insert(session.id.clone(), session.clone());
        tracing::debug!("Created session {}", session.id);
        session
    }

    /// Checks whether a session id exists
    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().contains_key(session_id)
    }

    /// Appends turns to a session's history, preserving order
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the session id is unknown
    pub fn append(&self, session_id: &str, turns: Vec<Turn>) -> Result<()> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| KaiwatoreError::SessionNotFound(session_id.to_string()))?;
        session.history.extend(turns);
        Ok(())
    }

    /// Returns a snapshot of a session's history
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the session id is unknown
    pub fn history(&self, session_id: &str) -> Result<Vec<Turn>> {
        let sessions = self.lock();
        sessions
            .get(session_id)
            .map(|s| s.history.clone())
            .ok_or_else(|| KaiwatoreError::SessionNotFound(session_id.to_string()).into())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        // A poisoned lock means a panic mid-append; the map itself is
        // still structurally sound, so keep serving
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
