//! Session middleware configuration.
//!
//! Carts live only as long as the visitor's session, so sessions are kept in
//! memory; restarting the storefront empties every cart. Expired records are
//! swept by a background task started with the session layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::{
    Expiry, SessionManagerLayer,
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store::{self, ExpiredDeletion, SessionStore},
};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vitrine_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// How often expired sessions are deleted.
const EXPIRED_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// In-memory session store that can delete expired records.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(Arc<Mutex<HashMap<Id, Record>>>);

impl MemorySessionStore {
    /// Delete expired sessions every `period`, forever.
    ///
    /// Runs as a task; see [`create_session_layer`].
    pub async fn sweep_expired_every(self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = self.delete_expired().await {
                tracing::warn!("Failed to delete expired sessions: {e}");
            }
        }
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut sessions = self.0.lock().await;
        while sessions.contains_key(&record.id) {
            record.id = Id::default();
        }
        sessions.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .0
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for MemorySessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let mut sessions = self.0.lock().await;
        let before = sessions.len();
        sessions.retain(|_, record| is_active(record));
        let deleted = before - sessions.len();
        if deleted > 0 {
            tracing::debug!(deleted, "expired sessions deleted");
        }
        Ok(())
    }
}

/// Create the session layer and start sweeping expired sessions.
///
/// Must be called from within a Tokio runtime.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemorySessionStore> {
    let store = MemorySessionStore::default();
    tokio::spawn(
        store
            .clone()
            .sweep_expired_every(EXPIRED_SWEEP_PERIOD),
    );

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
