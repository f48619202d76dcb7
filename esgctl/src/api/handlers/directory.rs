use axum::{Json, extract::Query};

use crate::{
    api::models::directory::{FundingPageResponse, FundingQuery, MarketplacePageResponse, MarketplaceQuery},
    api::models::users::CurrentUser,
    directory,
    errors::Result,
};

/// List marketplace companies with filters and pagination
#[utoipa::path(
    get,
    path = "/directory/marketplace",
    tag = "directory",
    params(MarketplaceQuery),
    responses(
        (status = 200, description = "One page of matching companies", body = MarketplacePageResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_marketplace(
    _current_user: CurrentUser,
    Query(query): Query<MarketplaceQuery>,
) -> Result<Json<MarketplacePageResponse>> {
    let filtered = directory::filter_marketplace(
        query.search.as_deref(),
        query.industry.as_deref(),
        query.location.as_deref(),
    );

    let page = query.page.page();
    let per_page = query.page.per_page();
    let data = directory::paginate(&filtered, page, per_page);

    Ok(Json(MarketplacePageResponse {
        data,
        total_count: filtered.len(),
        page,
        per_page,
    }))
}

/// List funding opportunities with filters and pagination
#[utoipa::path(
    get,
    path = "/directory/funding",
    tag = "directory",
    params(FundingQuery),
    responses(
        (status = 200, description = "One page of matching opportunities", body = FundingPageResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_funding(
    _current_user: CurrentUser,
    Query(query): Query<FundingQuery>,
) -> Result<Json<FundingPageResponse>> {
    let filtered = directory::filter_funding(
        query.search.as_deref(),
        query.category.as_deref(),
        query.status.as_deref(),
        query.min_amount,
        query.max_amount,
    );

    let page = query.page.page();
    let per_page = query.page.per_page();
    let data = directory::paginate(&filtered, page, per_page);

    Ok(Json(FundingPageResponse {
        data,
        total_count: filtered.len(),
        page,
        per_page,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_server, create_test_user_session};
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_marketplace_conjunction_filter(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let response = server
            .get("/api/v1/directory/marketplace?industry=Technology&location=USA")
            .add_header("authorization", bearer.clone())
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();

        let data = body["data"].as_array().unwrap();
        assert!(!data.is_empty());
        for company in data {
            assert_eq!(company["industry"], "Technology");
            assert_eq!(company["location"], "USA");
        }

        // "All" restores the predicate to always-true
        let response = server
            .get("/api/v1/directory/marketplace?industry=All&location=All")
            .add_header("authorization", bearer)
            .await;
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["total_count"].as_u64().unwrap() as usize,
            crate::directory::MARKETPLACE_COMPANIES.len()
        );
    }

    #[sqlx::test]
    async fn test_funding_pagination(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        // 13 opportunities with per_page 12: page 1 has 12, page 2 has 1
        let body: serde_json::Value = server
            .get("/api/v1/directory/funding?page=1&per_page=12")
            .add_header("authorization", bearer.clone())
            .await
            .json();
        assert_eq!(body["total_count"], 13);
        assert_eq!(body["data"].as_array().unwrap().len(), 12);

        let body: serde_json::Value = server
            .get("/api/v1/directory/funding?page=2&per_page=12")
            .add_header("authorization", bearer.clone())
            .await
            .json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        // A page past the end is empty, not clamped
        let body: serde_json::Value = server
            .get("/api/v1/directory/funding?page=9&per_page=12")
            .add_header("authorization", bearer)
            .await
            .json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    #[sqlx::test]
    async fn test_funding_amount_range(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let body: serde_json::Value = server
            .get("/api/v1/directory/funding?min_amount=100000&max_amount=300000")
            .add_header("authorization", bearer)
            .await
            .json();

        let data = body["data"].as_array().unwrap();
        assert!(!data.is_empty());
        for opportunity in data {
            let amount = opportunity["amount"].as_i64().unwrap();
            assert!((100_000..=300_000).contains(&amount));
        }
    }

    #[sqlx::test]
    async fn test_directory_requires_auth(pool: PgPool) {
        let server = create_test_server(pool).await;

        let response = server.get("/api/v1/directory/marketplace").await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    }
}
