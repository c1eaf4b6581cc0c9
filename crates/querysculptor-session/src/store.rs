use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use querysculptor_model::{QueryState, Session};
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;
use tokio::time::timeout;

use crate::error::SessionError;

const SESSION_TTL_SECONDS: u64 = 3600;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A `save`/`load`/`delete` session store backed by Redis, falling back
/// transparently to an in-process map when Redis is unreachable.
///
/// The Redis connection is established at most once, lazily, on first
/// access: a 2-second connect attempt followed by a `PING`. Success or
/// failure of that one attempt decides the store's mode for the rest of
/// the process's lifetime — later per-call Redis errors fall back to the
/// memory map for that call only, without re-deciding the mode.
pub struct SessionStore {
    redis_url: String,
    redis_conn: OnceCell<Option<ConnectionManager>>,
    memory: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            redis_conn: OnceCell::new(),
            memory: Mutex::new(HashMap::new()),
        }
    }

    async fn redis_connection(&self) -> Option<ConnectionManager> {
        self.redis_conn
            .get_or_init(|| async {
                let attempt = async {
                    let client = redis::Client::open(self.redis_url.as_str()).ok()?;
                    let mut manager = client.get_connection_manager().await.ok()?;
                    let pong: String = redis::cmd("PING").query_async(&mut manager).await.ok()?;
                    (pong == "PONG").then_some(manager)
                };
                match timeout(CONNECT_TIMEOUT, attempt).await {
                    Ok(Some(manager)) => {
                        tracing::info!(url = %self.redis_url, "connected to redis session store");
                        Some(manager)
                    }
                    Ok(None) => {
                        tracing::warn!("redis session store unreachable, falling back to in-memory store");
                        None
                    }
                    Err(_) => {
                        tracing::warn!("redis session store connect timed out, falling back to in-memory store");
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Persists `state` under `id`, wrapped in its `Session` envelope.
    /// `created_at` is preserved across saves (carried forward from the
    /// previously stored session, if any); `updated_at` is refreshed via
    /// `Session::touch` on every call — observability bookkeeping only,
    /// the TTL itself lives in the store backend.
    pub async fn save(&self, id: &str, state: &QueryState) -> Result<(), SessionError> {
        let mut session = match self.load_session(id).await? {
            Some(existing) => existing,
            None => Session::new(id, state.clone()),
        };
        session.state = state.clone();
        session.touch();

        let serialized = serde_json::to_string(&session)?;
        let key = session_key(id);

        if let Some(mut conn) = self.redis_connection().await {
            let result: redis::RedisResult<()> = redis::cmd("SETEX")
                .arg(&key)
                .arg(SESSION_TTL_SECONDS)
                .arg(&serialized)
                .query_async(&mut conn)
                .await;
            match result {
                Ok(()) => return Ok(()),
                Err(err) => tracing::warn!(error = %err, "redis SETEX failed, falling back to memory for this call"),
            }
        }

        self.memory
            .lock()
            .expect("session store memory lock poisoned")
            .insert(id.to_string(), serialized);
        Ok(())
    }

    pub async fn load(&self, id: &str) -> Result<Option<QueryState>, SessionError> {
        Ok(self.load_session(id).await?.map(|session| session.state))
    }

    async fn load_session(&self, id: &str) -> Result<Option<Session>, SessionError> {
        let key = session_key(id);

        if let Some(mut conn) = self.redis_connection().await {
            let result: redis::RedisResult<Option<String>> =
                redis::cmd("GET").arg(&key).query_async(&mut conn).await;
            match result {
                Ok(Some(text)) => return Ok(Some(serde_json::from_str(&text)?)),
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "redis GET failed, checking memory store"),
            }
        }

        match self.memory.lock().expect("session store memory lock poisoned").get(id) {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), SessionError> {
        let key = session_key(id);

        if let Some(mut conn) = self.redis_connection().await {
            let result: redis::RedisResult<()> = redis::cmd("DEL").arg(&key).query_async(&mut conn).await;
            if let Err(err) = result {
                tracing::warn!(error = %err, "redis DEL failed");
            }
        }

        self.memory.lock().expect("session store memory lock poisoned").remove(id);
        Ok(())
    }
}

fn session_key(id: &str) -> String {
    format!("querystate:{id}")
}
