//! Database models for one-shot OAuth state tokens.

use crate::types::{StateTokenId, UserId};
use chrono::{DateTime, Utc};

/// Database response for a state token row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OAuthStateDBResponse {
    pub id: StateTokenId,
    pub user_id: UserId,
    pub state_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
