//! Database models for accounting connections and organisation metadata.

use crate::types::{ConnectionId, UserId};
use chrono::{DateTime, Utc};

/// Database request for upserting a connection (keyed on (user_id, tenant_id))
#[derive(Debug, Clone)]
pub struct ConnectionUpsertDBRequest {
    pub user_id: UserId,
    pub tenant_id: String,
    pub tenant_name: String,
    pub tenant_type: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Database response for a connection
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConnectionDBResponse {
    pub id: ConnectionId,
    pub user_id: UserId,
    pub tenant_id: String,
    pub tenant_name: String,
    pub tenant_type: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for upserting organisation metadata (best-effort)
#[derive(Debug, Clone)]
pub struct OrganisationUpsertDBRequest {
    pub user_id: UserId,
    pub tenant_id: String,
    pub name: String,
    pub legal_name: Option<String>,
    pub country: Option<String>,
    pub organisation_type: Option<String>,
}

/// Database response for organisation metadata
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrganisationDBResponse {
    pub user_id: UserId,
    pub tenant_id: String,
    pub name: String,
    pub legal_name: Option<String>,
    pub country: Option<String>,
    pub organisation_type: Option<String>,
    pub updated_at: DateTime<Utc>,
}
