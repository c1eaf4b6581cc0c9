use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};

use crate::error::SchemaError;
use crate::introspection::fetch_introspection;
use crate::sdl::build_sdl;
use crate::types::CachedSchema;

type FetchSlot = Arc<OnceCell<Arc<CachedSchema>>>;

/// Per-process, read-mostly cache of schemas keyed by endpoint URL.
///
/// The first caller for a given endpoint populates a `OnceCell`;
/// concurrent first-callers await the same in-flight introspection fetch
/// instead of issuing duplicate requests. There is no eviction — the cache
/// lives for the process's lifetime — one introspection per endpoint, ever.
#[derive(Default)]
pub struct SchemaCache {
    slots: Mutex<HashMap<String, FetchSlot>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        env_headers: &HashMap<String, String>,
        session_headers: &HashMap<String, String>,
    ) -> Result<Arc<CachedSchema>, SchemaError> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots
                .entry(endpoint.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        slot.get_or_try_init(|| async {
            info!(endpoint, "introspecting upstream schema for the first time");
            let (introspected, raw_json) =
                fetch_introspection(client, endpoint, env_headers, session_headers)
                    .await
                    .map_err(|e| {
                        warn!(endpoint, error = %e, "introspection failed, not caching");
                        e
                    })?;
            let sdl = build_sdl(&introspected);
            CachedSchema::from_sdl(endpoint, sdl, raw_json).map(Arc::new)
        })
        .await
        .map(Arc::clone)
    }

    /// Pre-populates the cache for `endpoint` with an already-built schema,
    /// bypassing introspection entirely. Exists for callers (and tests)
    /// that already have a schema in hand and want `get_or_fetch` to be a
    /// pure cache hit rather than a network call.
    pub async fn prime(&self, endpoint: &str, schema: CachedSchema) {
        let cell = OnceCell::new();
        let _ = cell.set(Arc::new(schema));
        self.slots.lock().await.insert(endpoint.to_string(), Arc::new(cell));
    }
}
