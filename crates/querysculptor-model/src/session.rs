use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::QueryState;

/// A server-side workspace holding one in-progress query state, keyed by an
/// opaque 32-hex-character id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub state: QueryState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, state: QueryState) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            state,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
