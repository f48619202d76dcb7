//! Database models for office locations.

use crate::types::{LocationId, UserId};
use chrono::{DateTime, Utc};

/// Name given to the location created lazily for users with none.
pub const DEFAULT_LOCATION_NAME: &str = "Main Office";

/// Database request for creating a location
#[derive(Debug, Clone)]
pub struct LocationCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub address: String,
}

/// Database request for updating a location
#[derive(Debug, Clone, Default)]
pub struct LocationUpdateDBRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Database response for a location
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationDBResponse {
    pub id: LocationId,
    pub user_id: UserId,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
