//! Static marketplace and funding directories.
//!
//! Both datasets are fixed at build time; the application filters and
//! paginates them but never persists or mutates them. Filters are a
//! conjunction of a case-insensitive substring match on the name, equality
//! checks where `None`/`"All"` mean "match everything", and an inclusive
//! amount range for funding.

mod funding;
mod marketplace;

use serde::Serialize;
use utoipa::ToSchema;

pub use funding::FUNDING_OPPORTUNITIES;
pub use marketplace::MARKETPLACE_COMPANIES;

/// A sustainability vendor listed in the marketplace.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct MarketplaceCompany {
    pub name: &'static str,
    pub industry: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub website: &'static str,
}

/// A grant or funding program listed in the funding directory.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct FundingOpportunity {
    pub name: &'static str,
    pub provider: &'static str,
    pub category: &'static str,
    pub status: &'static str,
    /// Maximum funding amount in whole dollars
    pub amount: i64,
    pub description: &'static str,
}

/// True when the filter is absent or the "All" sentinel.
fn matches_all(filter: Option<&str>) -> bool {
    matches!(filter, None | Some("All"))
}

fn eq_or_all(filter: Option<&str>, value: &str) -> bool {
    matches_all(filter) || filter == Some(value)
}

fn name_matches(search: Option<&str>, name: &str) -> bool {
    match search {
        None => true,
        Some(query) => name.to_lowercase().contains(&query.to_lowercase()),
    }
}

/// Filter the marketplace by name substring, industry, and location.
pub fn filter_marketplace(
    search: Option<&str>,
    industry: Option<&str>,
    location: Option<&str>,
) -> Vec<MarketplaceCompany> {
    MARKETPLACE_COMPANIES
        .iter()
        .filter(|company| {
            name_matches(search, company.name)
                && eq_or_all(industry, company.industry)
                && eq_or_all(location, company.location)
        })
        .copied()
        .collect()
}

/// Filter funding opportunities by name substring, category, status, and
/// inclusive amount range.
pub fn filter_funding(
    search: Option<&str>,
    category: Option<&str>,
    status: Option<&str>,
    min_amount: Option<i64>,
    max_amount: Option<i64>,
) -> Vec<FundingOpportunity> {
    FUNDING_OPPORTUNITIES
        .iter()
        .filter(|opportunity| {
            name_matches(search, opportunity.name)
                && eq_or_all(category, opportunity.category)
                && eq_or_all(status, opportunity.status)
                && min_amount.is_none_or(|min| opportunity.amount >= min)
                && max_amount.is_none_or(|max| opportunity.amount <= max)
        })
        .copied()
        .collect()
}

/// Slice one 1-indexed page out of a filtered list.
///
/// A page past the end yields an empty slice; the caller's total count lets
/// clients navigate back.
pub fn paginate<T: Copy>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    items.iter().skip(start).take(per_page).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_conjunction() {
        let filtered = filter_marketplace(None, Some("Technology"), Some("USA"));

        assert!(!filtered.is_empty());
        for company in &filtered {
            assert_eq!(company.industry, "Technology");
            assert_eq!(company.location, "USA");
        }

        // The conjunction subset is never larger than either single filter
        let by_industry = filter_marketplace(None, Some("Technology"), None);
        assert!(filtered.len() <= by_industry.len());
    }

    #[test]
    fn test_all_sentinel_restores_predicate() {
        let unfiltered = filter_marketplace(None, None, None);
        let all_all = filter_marketplace(None, Some("All"), Some("All"));

        assert_eq!(unfiltered.len(), MARKETPLACE_COMPANIES.len());
        assert_eq!(all_all.len(), MARKETPLACE_COMPANIES.len());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let lower = filter_marketplace(Some("carbon"), None, None);
        let upper = filter_marketplace(Some("CARBON"), None, None);

        assert_eq!(lower.len(), upper.len());
        assert!(!lower.is_empty());
        for company in &lower {
            assert!(company.name.to_lowercase().contains("carbon"));
        }
    }

    #[test]
    fn test_funding_amount_range_inclusive() {
        let filtered = filter_funding(None, None, None, Some(50_000), Some(250_000));

        assert!(!filtered.is_empty());
        for opportunity in &filtered {
            assert!(opportunity.amount >= 50_000 && opportunity.amount <= 250_000);
        }
    }

    #[test]
    fn test_funding_status_filter() {
        let open = filter_funding(None, None, Some("Open"), None, None);
        assert!(!open.is_empty());
        for opportunity in &open {
            assert_eq!(opportunity.status, "Open");
        }
    }

    #[test]
    fn test_funding_pagination_13_items() {
        // The full funding list is 13 entries; with a page size of 12 the
        // first page holds 12 items and the second holds the remaining 1.
        let all = filter_funding(None, None, None, None, None);
        assert_eq!(all.len(), 13);

        let page1 = paginate(&all, 1, 12);
        let page2 = paginate(&all, 2, 12);
        let page3 = paginate(&all, 3, 12);

        assert_eq!(page1.len(), 12);
        assert_eq!(page2.len(), 1);
        assert!(page3.is_empty());
    }

    #[test]
    fn test_pagination_past_end_is_empty_not_clamped() {
        let all = filter_marketplace(None, None, None);
        let far_page = paginate(&all, 99, 12);
        assert!(far_page.is_empty());
    }
}
