//! Database models for emission records.

use crate::api::models::emissions::EmissionCategory;
use crate::types::{EmissionRecordId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One line item to insert during a set replacement. Sentinel rows carry
/// `source_type = "N/A"`, `is_applicable = false` and no quantity.
#[derive(Debug, Clone)]
pub struct EmissionRecordInsert {
    pub source_type: String,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub is_applicable: bool,
}

/// Database response for an emission record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmissionRecordDBResponse {
    pub id: EmissionRecordId,
    pub user_id: UserId,
    pub category: EmissionCategory,
    pub source_type: String,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub is_applicable: bool,
    pub created_at: DateTime<Utc>,
}
