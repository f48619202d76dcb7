//! API query/response models for the marketplace and funding directories.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

use super::pagination::DirectoryPage;
use crate::directory::{FundingOpportunity, MarketplaceCompany};

/// Filters for the marketplace directory. Omitted filters (or the literal
/// `"All"`) match everything.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MarketplaceQuery {
    /// Case-insensitive substring match on company name
    pub search: Option<String>,
    /// Industry filter ("All" or omitted matches everything)
    pub industry: Option<String>,
    /// Location filter ("All" or omitted matches everything)
    pub location: Option<String>,
    #[serde(flatten)]
    #[param(inline)]
    pub page: DirectoryPage,
}

/// Filters for the funding directory. Omitted filters (or the literal
/// `"All"`) match everything; amounts bound the range inclusively.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct FundingQuery {
    /// Case-insensitive substring match on opportunity name
    pub search: Option<String>,
    /// Category filter ("All" or omitted matches everything)
    pub category: Option<String>,
    /// Status filter ("All" or omitted matches everything)
    pub status: Option<String>,
    /// Minimum funding amount (inclusive)
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub min_amount: Option<i64>,
    /// Maximum funding amount (inclusive)
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_amount: Option<i64>,
    #[serde(flatten)]
    #[param(inline)]
    pub page: DirectoryPage,
}

/// One page of a filtered directory listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DirectoryPageResponse<T: ToSchema> {
    pub data: Vec<T>,
    /// Total matches before pagination
    pub total_count: usize,
    /// 1-indexed page served
    pub page: usize,
    pub per_page: usize,
}

pub type MarketplacePageResponse = DirectoryPageResponse<MarketplaceCompany>;
pub type FundingPageResponse = DirectoryPageResponse<FundingOpportunity>;
