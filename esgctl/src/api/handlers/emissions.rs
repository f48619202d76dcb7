use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    api::models::{
        emissions::{
            CategoryRecordsResponse, EmissionCategory, EmissionRecordResponse, EmissionSave, NOT_APPLICABLE_SOURCE,
        },
        users::CurrentUser,
    },
    db::{handlers::EmissionRecords, models::emissions::EmissionRecordInsert},
    errors::{Error, Result},
};

/// Derive applicability from a stored record set: a sentinel row means the
/// user marked the category "not applicable".
fn derive_applicable(records: &[EmissionRecordResponse]) -> bool {
    !records.iter().any(|r| !r.is_applicable)
}

/// Get the current user's records for one emission category
#[utoipa::path(
    get,
    path = "/emissions/{category}",
    tag = "emissions",
    params(
        ("category" = EmissionCategory, Path, description = "Emission category"),
    ),
    responses(
        (status = 200, description = "Records for the category", body = CategoryRecordsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all, fields(category = %category))]
pub async fn get_category_records(
    State(state): State<AppState>,
    Path(category): Path<EmissionCategory>,
    current_user: CurrentUser,
) -> Result<Json<CategoryRecordsResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = EmissionRecords::new(&mut pool_conn);

    let records: Vec<EmissionRecordResponse> = repo
        .list_for_user(current_user.id, category)
        .await?
        .into_iter()
        .map(EmissionRecordResponse::from)
        .collect();

    let applicable = derive_applicable(&records);

    Ok(Json(CategoryRecordsResponse {
        category,
        applicable,
        records,
        known_sources: category.known_sources().iter().map(|s| s.to_string()).collect(),
    }))
}

/// Replace the current user's records for one emission category
///
/// The save is a whole-set replacement executed in a single transaction:
/// marking the category "not applicable" stores exactly one sentinel row;
/// otherwise only line items with a positive quantity are stored, and
/// blank/zero/negative quantities are silently dropped.
#[utoipa::path(
    put,
    path = "/emissions/{category}",
    request_body = EmissionSave,
    tag = "emissions",
    params(
        ("category" = EmissionCategory, Path, description = "Emission category"),
    ),
    responses(
        (status = 200, description = "Records replaced", body = CategoryRecordsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all, fields(category = %category, applicable = request.applicable))]
pub async fn save_category_records(
    State(state): State<AppState>,
    Path(category): Path<EmissionCategory>,
    current_user: CurrentUser,
    Json(request): Json<EmissionSave>,
) -> Result<Json<CategoryRecordsResponse>> {
    let inserts: Vec<EmissionRecordInsert> = if request.applicable {
        request
            .records
            .into_iter()
            .filter(|entry| entry.quantity.is_some_and(|q| q > Decimal::ZERO))
            .map(|entry| EmissionRecordInsert {
                source_type: entry.source_type,
                quantity: entry.quantity,
                unit: entry.unit,
                is_applicable: true,
            })
            .collect()
    } else {
        vec![EmissionRecordInsert {
            source_type: NOT_APPLICABLE_SOURCE.to_string(),
            quantity: None,
            unit: None,
            is_applicable: false,
        }]
    };

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = EmissionRecords::new(&mut pool_conn);

    let records: Vec<EmissionRecordResponse> = repo
        .replace_for_user(current_user.id, category, &inserts)
        .await?
        .into_iter()
        .map(EmissionRecordResponse::from)
        .collect();

    let applicable = derive_applicable(&records);

    Ok(Json(CategoryRecordsResponse {
        category,
        applicable,
        records,
        known_sources: category.known_sources().iter().map(|s| s.to_string()).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::emissions::EmissionEntry;
    use crate::test_utils::{create_test_server, create_test_user_session};
    use sqlx::PgPool;

    fn save_body(applicable: bool, entries: Vec<(&str, Option<i64>)>) -> EmissionSave {
        EmissionSave {
            applicable,
            records: entries
                .into_iter()
                .map(|(source, quantity)| EmissionEntry {
                    source_type: source.to_string(),
                    quantity: quantity.map(Decimal::from),
                    unit: Some("kWh".to_string()),
                })
                .collect(),
        }
    }

    #[sqlx::test]
    async fn test_not_applicable_save_leaves_one_sentinel(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        // Seed some rows first
        server
            .put("/api/v1/emissions/stationary_combustion")
            .add_header("authorization", bearer.clone())
            .json(&save_body(true, vec![("Natural Gas", Some(100)), ("Diesel", Some(50))]))
            .await
            .assert_status_ok();

        // Toggle to not applicable: exactly one sentinel row remains
        let response = server
            .put("/api/v1/emissions/stationary_combustion")
            .add_header("authorization", bearer.clone())
            .json(&save_body(false, vec![]))
            .await;
        response.assert_status_ok();
        let body: CategoryRecordsResponse = response.json();
        assert!(!body.applicable);
        assert_eq!(body.records.len(), 1);
        assert_eq!(body.records[0].source_type, NOT_APPLICABLE_SOURCE);

        // Fetch agrees
        let body: CategoryRecordsResponse = server
            .get("/api/v1/emissions/stationary_combustion")
            .add_header("authorization", bearer)
            .await
            .json();
        assert!(!body.applicable);
        assert_eq!(body.records.len(), 1);
    }

    #[sqlx::test]
    async fn test_blank_quantities_dropped_silently(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        // All quantities blank or non-positive: save succeeds with zero rows
        let response = server
            .put("/api/v1/emissions/mobile_combustion")
            .add_header("authorization", bearer.clone())
            .json(&save_body(true, vec![("Petrol", None), ("Diesel", Some(0)), ("LPG", Some(-5))]))
            .await;
        response.assert_status_ok();
        let body: CategoryRecordsResponse = response.json();
        assert!(body.applicable);
        assert!(body.records.is_empty());

        // Mixed: only the positive row survives
        let response = server
            .put("/api/v1/emissions/mobile_combustion")
            .add_header("authorization", bearer)
            .json(&save_body(true, vec![("Petrol", None), ("Diesel", Some(40))]))
            .await;
        let body: CategoryRecordsResponse = response.json();
        assert_eq!(body.records.len(), 1);
        assert_eq!(body.records[0].source_type, "Diesel");
    }

    #[sqlx::test]
    async fn test_second_save_replaces_first(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        server
            .put("/api/v1/emissions/refrigerants")
            .add_header("authorization", bearer.clone())
            .json(&save_body(true, vec![("R-410A", Some(3)), ("R-134a", Some(2))]))
            .await
            .assert_status_ok();

        server
            .put("/api/v1/emissions/refrigerants")
            .add_header("authorization", bearer.clone())
            .json(&save_body(true, vec![("R-32", Some(1))]))
            .await
            .assert_status_ok();

        // No merge, no duplication: exactly the second save's rows remain
        let body: CategoryRecordsResponse = server
            .get("/api/v1/emissions/refrigerants")
            .add_header("authorization", bearer)
            .await
            .json();
        assert_eq!(body.records.len(), 1);
        assert_eq!(body.records[0].source_type, "R-32");
    }

    #[sqlx::test]
    async fn test_empty_category_reads_applicable(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let body: CategoryRecordsResponse = server
            .get("/api/v1/emissions/waste")
            .add_header("authorization", bearer)
            .await
            .json();
        assert!(body.applicable);
        assert!(body.records.is_empty());
        // Empty forms are seeded from the category's known sources
        assert!(body.known_sources.contains(&"Landfill".to_string()));
    }

    #[sqlx::test]
    async fn test_unknown_category_rejected(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let response = server
            .get("/api/v1/emissions/unicorns")
            .add_header("authorization", bearer)
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    async fn test_requires_auth(pool: PgPool) {
        let server = create_test_server(pool).await;

        let response = server.get("/api/v1/emissions/water").await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    }
}
