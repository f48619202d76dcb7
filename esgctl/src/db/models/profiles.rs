//! Database models for company profiles.

use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Database request for upserting a profile (keyed on user_id)
#[derive(Debug, Clone)]
pub struct ProfileUpsertDBRequest {
    pub user_id: UserId,
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub reporting_framework: Option<String>,
    pub country: Option<String>,
}

/// Database response for a profile
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileDBResponse {
    pub user_id: UserId,
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub reporting_framework: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
