use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, username: String) -> Self {
        Self {
            token,
            username,
            created_at: Utc::now(),
        }
    }
}

/// Shared handle to the current sign-in.
/// Clone is cheap - all clones see the same token slot.
#[derive(Debug, Clone, Default)]
pub struct Session {
    data: Arc<RwLock<Option<SessionData>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with new data
    pub async fn update(&self, data: SessionData) {
        *self.data.write().await = Some(data);
    }

    /// Clear session data
    pub async fn clear(&self) {
        *self.data.write().await = None;
    }

    /// Get the bearer token if signed in
    pub async fn token(&self) -> Option<String> {
        self.data.read().await.as_ref().map(|d| d.token.clone())
    }

    pub async fn username(&self) -> Option<String> {
        self.data.read().await.as_ref().map(|d| d.username.clone())
    }

    pub async fn is_valid(&self) -> bool {
        self.data.read().await.is_some()
    }
}
