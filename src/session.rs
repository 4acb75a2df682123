//! Per-dialog session storage
//!
//! A session lives from the first request of a USSD dialog until the
//! dialog ends. Gateways do not always send a final request (the user can
//! hang up), so idle sessions expire after a TTL and are swept by a
//! background task.

use crate::dialog::Flow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// State kept between requests of one dialog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub flow: Flow,
    /// Scratch space, cleared whenever the dialog returns to the menu
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `flow`, clearing scratch data when entering the menu
    pub fn enter(&mut self, flow: Flow) {
        if flow == Flow::Menu {
            self.data.clear();
        }
        self.flow = flow;
    }
}

/// Storage for dialog sessions keyed by the gateway's session id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a live session
    async fn get(&self, key: &str) -> Result<Option<Session>, String>;

    /// Create or replace a session; last write wins
    async fn set(&self, key: &str, session: Session) -> Result<(), String>;

    /// Remove a session, returning whether one existed
    async fn delete(&self, key: &str) -> Result<bool, String>;

    /// Drop sessions idle for longer than the store's TTL
    async fn purge_idle(&self) -> usize;

    /// Number of stored sessions (including not-yet-purged idle ones)
    async fn len(&self) -> usize;
}

struct Entry {
    session: Session,
    touched_at: Instant,
}

/// Process-local session store
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.touched_at) > self.ttl
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<Session>, String> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(key)
            .filter(|entry| !self.is_expired(entry, Instant::now()))
            .map(|entry| entry.session.clone()))
    }

    async fn set(&self, key: &str, session: Session) -> Result<(), String> {
        self.sessions.write().await.insert(
            key.to_string(),
            Entry {
                session,
                touched_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        Ok(self.sessions.write().await.remove(key).is_some())
    }

    async fn purge_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically purge idle sessions until `cancel` fires
pub fn spawn_reaper(
    store: Arc<dyn SessionStore>,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!("Session reaper stopped");
                    break;
                }
                _ = interval.tick() => {
                    let purged = store.purge_idle().await;
                    if purged > 0 {
                        let remaining = store.len().await;
                        tracing::info!(purged, remaining, "Purged idle USSD sessions");
                    }
                }
            }
        }
    })
}
