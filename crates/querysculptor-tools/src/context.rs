use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use querysculptor_model::QueryState;
use querysculptor_schema::{CachedSchema, SchemaCache};
use querysculptor_session::SessionStore;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ToolError;

/// The explicit application context every tool handler is threaded with,
/// rather than relying on implicit singletons (schema cache, Redis client,
/// memory map): one shared HTTP client, one per-process schema cache, one
/// session store, and the registry of per-session locks that gives each
/// tool call the guarantee that it mutates a session under a critical
/// section.
pub struct AppContext {
    pub http: reqwest::Client,
    pub schema_cache: SchemaCache,
    pub session_store: SessionStore,
    pub config: AppConfig,
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            schema_cache: SchemaCache::new(),
            session_store: SessionStore::new(config.redis_url.clone()),
            config,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// A fresh 32-hex-character session id.
    pub fn generate_session_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Acquires (creating if necessary) the per-session lock, held for the
    /// duration of one tool call's load-mutate-persist critical section.
    /// Acquiring the lock itself is a short, separately-guarded operation —
    /// only the map lookup/insert is serialized process-wide, not the
    /// session body itself.
    pub async fn lock_session(&self, session_id: &str) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.session_locks.lock().await;
            locks
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Loads the session's `QueryState`, or a `SESSION` `ToolError` if it
    /// is unknown or expired.
    pub async fn load_state(&self, session_id: &str) -> Result<QueryState, ToolError> {
        self.session_store
            .load(session_id)
            .await?
            .ok_or_else(|| ToolError::session_not_found(session_id))
    }

    pub async fn save_state(&self, session_id: &str, state: &QueryState) -> Result<(), ToolError> {
        self.session_store.save(session_id, state).await?;
        Ok(())
    }

    /// The cached schema for the single configured upstream, merging this
    /// session's own headers under the process's env-default headers
    /// (session wins) the way introspection always does.
    pub async fn schema_for(&self, session_headers: &IndexMap<String, String>) -> Result<Arc<CachedSchema>, ToolError> {
        let session_headers: HashMap<String, String> = session_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.schema_cache
            .get_or_fetch(
                &self.http,
                &self.config.graphql_endpoint,
                &self.config.env_headers,
                &session_headers,
            )
            .await
            .map_err(Into::into)
    }
}
