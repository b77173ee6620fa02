use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::{IdGenerator, Result};

use super::records::{ShoppingListRecord, dehydrate};
use super::seed::Seed;

pub type SessionRecords = Vec<ShoppingListRecord>;

/// Exclusive access to one session's records. Other requests for the same
/// session wait until the guard is dropped.
pub type SessionGuard = OwnedMutexGuard<SessionRecords>;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lock the session's records, creating and seeding the session first
    /// if it does not exist yet.
    async fn checkout(&self, id: SessionId) -> Result<SessionGuard>;
    async fn remove(&self, id: SessionId) -> bool;
    /// Drop every session that has not been checked out within the idle
    /// timeout. Returns how many were dropped.
    async fn expire_idle(&self) -> usize;
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

struct SessionSlot {
    records: Arc<Mutex<SessionRecords>>,
    /// Milliseconds since the store was created.
    last_seen: AtomicU64,
}

impl SessionSlot {
    /// The map holds one reference; any other is a request in flight.
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.records) > 1
    }

    fn last_seen(&self) -> u64 {
        self.last_seen.load(Ordering::Relaxed)
    }
}

/// Process-memory session store. Nothing survives a restart.
///
/// Sessions idle for longer than the idle timeout are dropped, and the store
/// never grows past `max_sessions` while a least-recently-used idle session
/// can be evicted instead. Sessions with a request in flight are never
/// dropped.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionSlot>>,
    seed: Seed,
    ids: Arc<IdGenerator>,
    idle_timeout: Duration,
    max_sessions: usize,
    started: Instant,
}

impl InMemorySessionStore {
    pub fn new(seed: Seed, ids: Arc<IdGenerator>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            seed,
            ids,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_sessions: DEFAULT_MAX_SESSIONS,
            started: Instant::now(),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn is_expired(&self, slot: &SessionSlot, now: u64) -> bool {
        let timeout = u64::try_from(self.idle_timeout.as_millis()).unwrap_or(u64::MAX);
        !slot.in_use() && now.saturating_sub(slot.last_seen()) >= timeout
    }

    fn drop_expired(&self, sessions: &mut HashMap<SessionId, SessionSlot>) -> usize {
        let now = self.now_ms();
        let before = sessions.len();
        sessions.retain(|_, slot| !self.is_expired(slot, now));
        before - sessions.len()
    }

    /// Make room for one more session, evicting the least recently seen idle
    /// sessions first.
    fn make_room(&self, sessions: &mut HashMap<SessionId, SessionSlot>) {
        let expired = self.drop_expired(sessions);
        if expired > 0 {
            debug!(expired, "dropped idle sessions");
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .filter(|(_, slot)| !slot.in_use())
                .min_by_key(|(_, slot)| slot.last_seen())
                .map(|(id, _)| *id);

            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    debug!(session = %id, "evicted least recently used session");
                }
                // every session has a request in flight
                None => break,
            }
        }
    }

    async fn slot(&self, id: SessionId) -> Result<Arc<Mutex<SessionRecords>>> {
        if let Some(slot) = self.sessions.read().await.get(&id) {
            slot.last_seen.store(self.now_ms(), Ordering::Relaxed);
            return Ok(Arc::clone(&slot.records));
        }

        let mut sessions = self.sessions.write().await;
        // another request may have created it between the two locks
        if let Some(slot) = sessions.get(&id) {
            slot.last_seen.store(self.now_ms(), Ordering::Relaxed);
            return Ok(Arc::clone(&slot.records));
        }

        let lists = self.seed.build(&self.ids)?;
        self.make_room(&mut sessions);
        debug!(session = %id, lists = lists.len(), "seeded new session");

        let records = Arc::new(Mutex::new(dehydrate(&lists)));
        sessions.insert(
            id,
            SessionSlot {
                records: Arc::clone(&records),
                last_seen: AtomicU64::new(self.now_ms()),
            },
        );
        Ok(records)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn checkout(&self, id: SessionId) -> Result<SessionGuard> {
        let slot = self.slot(id).await?;
        Ok(slot.lock_owned().await)
    }

    async fn remove(&self, id: SessionId) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    async fn expire_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let expired = self.drop_expired(&mut sessions);
        if expired > 0 {
            info!(expired, remaining = sessions.len(), "expired idle sessions");
        }
        expired
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
