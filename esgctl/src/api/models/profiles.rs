//! API request/response models for company profiles.

use crate::db::models::profiles::ProfileDBResponse;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpsert {
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub reporting_framework: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub reporting_framework: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDBResponse> for ProfileResponse {
    fn from(db: ProfileDBResponse) -> Self {
        Self {
            user_id: db.user_id,
            company_name: db.company_name,
            industry: db.industry,
            company_size: db.company_size,
            reporting_framework: db.reporting_framework,
            country: db.country,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
