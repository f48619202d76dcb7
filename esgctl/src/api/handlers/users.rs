use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::{
        pagination::PaginatedResponse,
        users::{CurrentUser, ListUsersQuery, UserResponse},
    },
    auth::current_user::require_admin,
    db::handlers::{Repository, Users, users::UserFilter},
    errors::{Error, Result},
};

/// List user accounts (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = PaginatedResponse<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>> {
    require_admin(&current_user)?;

    let skip = query.pagination.skip();
    let limit = query.pagination.limit();

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    let total_count = repo.count().await?;
    let users = repo
        .list(&UserFilter::new(skip, limit).with_search(query.search))
        .await?;

    Ok(Json(PaginatedResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
        total_count,
        skip,
        limit,
    )))
}

/// Get the current authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    let user = repo.get_by_id(current_user.id).await?.ok_or_else(|| Error::Unauthenticated {
        message: Some("User not found".to_string()),
    })?;

    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_admin_session, create_test_server, create_test_user_session};
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_get_me(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (user, bearer) = create_test_user_session(&pool).await;

        let response = server.get("/api/v1/users/me").add_header("authorization", bearer).await;
        response.assert_status_ok();

        let body: UserResponse = response.json();
        assert_eq!(body.id, user.id);
        assert_eq!(body.email, user.email);
    }

    #[sqlx::test]
    async fn test_list_users_admin_only(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, user_bearer) = create_test_user_session(&pool).await;
        let (_admin, admin_bearer) = create_test_admin_session(&pool).await;

        let response = server.get("/api/v1/users").add_header("authorization", user_bearer).await;
        response.assert_status(axum::http::StatusCode::FORBIDDEN);

        let response = server.get("/api/v1/users").add_header("authorization", admin_bearer).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert!(body["total_count"].as_i64().unwrap() >= 2);
    }
}
