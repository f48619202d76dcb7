//! API request/response models for emission records.

use crate::db::models::emissions::EmissionRecordDBResponse;
use crate::types::EmissionRecordId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Source type marker used for the "not applicable" sentinel row.
pub const NOT_APPLICABLE_SOURCE: &str = "N/A";

/// Emission record categories across GHG Protocol scopes.
///
/// Scope 1: stationary/mobile combustion, process emissions, refrigerants.
/// Scope 3: waste, paper, water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "emission_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmissionCategory {
    StationaryCombustion,
    MobileCombustion,
    ProcessEmissions,
    Refrigerants,
    Waste,
    Paper,
    Water,
}

impl EmissionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionCategory::StationaryCombustion => "stationary_combustion",
            EmissionCategory::MobileCombustion => "mobile_combustion",
            EmissionCategory::ProcessEmissions => "process_emissions",
            EmissionCategory::Refrigerants => "refrigerants",
            EmissionCategory::Waste => "waste",
            EmissionCategory::Paper => "paper",
            EmissionCategory::Water => "water",
        }
    }

    /// Known source types offered by the dashboard for this category. The
    /// save path does not reject other values; these seed empty forms.
    pub fn known_sources(&self) -> &'static [&'static str] {
        match self {
            EmissionCategory::StationaryCombustion => &["Natural Gas", "Diesel", "LPG", "Coal", "Biomass"],
            EmissionCategory::MobileCombustion => &["Petrol", "Diesel", "LPG", "Electric"],
            EmissionCategory::ProcessEmissions => &["CO2", "CH4", "N2O"],
            EmissionCategory::Refrigerants => &["R-410A", "R-134a", "R-404A", "R-32"],
            EmissionCategory::Waste => &["Landfill", "Recycling", "Compost"],
            EmissionCategory::Paper => &["Office Paper", "Cardboard"],
            EmissionCategory::Water => &["Mains Water", "Recycled Water"],
        }
    }
}

impl std::fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line item submitted from a category form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmissionEntry {
    pub source_type: String,
    /// Quantity in the given unit. Blank, zero, or negative entries are
    /// silently dropped from the save, not rejected.
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
}

/// Full replacement save for one (user, category) record set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmissionSave {
    /// Whether this emission source exists for the reporting organization.
    pub applicable: bool,
    #[serde(default)]
    pub records: Vec<EmissionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmissionRecordResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: EmissionRecordId,
    pub source_type: String,
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub is_applicable: bool,
    pub created_at: DateTime<Utc>,
}

impl From<EmissionRecordDBResponse> for EmissionRecordResponse {
    fn from(db: EmissionRecordDBResponse) -> Self {
        Self {
            id: db.id,
            source_type: db.source_type,
            quantity: db.quantity,
            unit: db.unit,
            is_applicable: db.is_applicable,
            created_at: db.created_at,
        }
    }
}

/// Everything the dashboard needs to render one category step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryRecordsResponse {
    pub category: EmissionCategory,
    /// Derived: false when the stored set is a lone sentinel row.
    pub applicable: bool,
    pub records: Vec<EmissionRecordResponse>,
    /// Source types offered for this category; used to seed empty forms.
    pub known_sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_round_trip() {
        let json = serde_json::to_string(&EmissionCategory::StationaryCombustion).unwrap();
        assert_eq!(json, "\"stationary_combustion\"");

        let parsed: EmissionCategory = serde_json::from_str("\"refrigerants\"").unwrap();
        assert_eq!(parsed, EmissionCategory::Refrigerants);
    }

    #[test]
    fn test_known_sources_nonempty() {
        for category in [
            EmissionCategory::StationaryCombustion,
            EmissionCategory::MobileCombustion,
            EmissionCategory::ProcessEmissions,
            EmissionCategory::Refrigerants,
            EmissionCategory::Waste,
            EmissionCategory::Paper,
            EmissionCategory::Water,
        ] {
            assert!(!category.known_sources().is_empty());
        }
    }
}
