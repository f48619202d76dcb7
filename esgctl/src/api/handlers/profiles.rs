use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{
        profiles::{ProfileResponse, ProfileUpsert},
        users::CurrentUser,
    },
    db::{handlers::Profiles, models::profiles::ProfileUpsertDBRequest},
    errors::{Error, Result},
};

/// Get the current user's company profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Company profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile saved yet"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_profile(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<ProfileResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Profiles::new(&mut pool_conn);

    let profile = repo.get_for_user(current_user.id).await?.ok_or_else(|| Error::NotFound {
        resource: "Profile".to_string(),
        id: current_user.id.to_string(),
    })?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// Create or replace the current user's company profile
#[utoipa::path(
    put,
    path = "/profile",
    request_body = ProfileUpsert,
    tag = "profile",
    responses(
        (status = 200, description = "Profile saved", body = ProfileResponse),
        (status = 400, description = "Invalid profile data"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ProfileUpsert>,
) -> Result<Json<ProfileResponse>> {
    if request.company_name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Company name cannot be empty".to_string(),
        });
    }

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Profiles::new(&mut pool_conn);

    let profile = repo
        .upsert(&ProfileUpsertDBRequest {
            user_id: current_user.id,
            company_name: request.company_name,
            industry: request.industry,
            company_size: request.company_size,
            reporting_framework: request.reporting_framework,
            country: request.country,
        })
        .await?;

    Ok(Json(ProfileResponse::from(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_server, create_test_user_session};
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_profile_lifecycle(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        // Absent profile reads as 404, not a masked default
        let response = server.get("/api/v1/profile").add_header("authorization", bearer.clone()).await;
        response.assert_status(axum::http::StatusCode::NOT_FOUND);

        let response = server
            .put("/api/v1/profile")
            .add_header("authorization", bearer.clone())
            .json(&ProfileUpsert {
                company_name: "Acme Widgets".to_string(),
                industry: Some("Manufacturing".to_string()),
                company_size: Some("11-50".to_string()),
                reporting_framework: None,
                country: Some("Australia".to_string()),
            })
            .await;
        response.assert_status_ok();

        let response = server.get("/api/v1/profile").add_header("authorization", bearer).await;
        response.assert_status_ok();
        let body: ProfileResponse = response.json();
        assert_eq!(body.company_name, "Acme Widgets");
        assert_eq!(body.country, Some("Australia".to_string()));
    }

    #[sqlx::test]
    async fn test_profile_requires_auth(pool: PgPool) {
        let server = create_test_server(pool).await;

        let response = server.get("/api/v1/profile").await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_empty_company_name_rejected(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let response = server
            .put("/api/v1/profile")
            .add_header("authorization", bearer)
            .json(&ProfileUpsert {
                company_name: "   ".to_string(),
                industry: None,
                company_size: None,
                reporting_framework: None,
                country: None,
            })
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }
}
