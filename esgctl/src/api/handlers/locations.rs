use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        locations::{LocationCreate, LocationResponse, LocationUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::Locations,
        models::locations::{LocationCreateDBRequest, LocationUpdateDBRequest},
    },
    errors::{Error, Result},
    types::LocationId,
};

/// List the current user's office locations
///
/// A user with no locations gets a default "Main Office" created on first
/// access, so this endpoint never returns an empty list.
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    responses(
        (status = 200, description = "Office locations", body = [LocationResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_locations(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<LocationResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Locations::new(&mut pool_conn);

    let locations = repo.list_with_default(current_user.id).await?;
    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

/// Add an office location
#[utoipa::path(
    post,
    path = "/locations",
    request_body = LocationCreate,
    tag = "locations",
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Invalid location data"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A location with this name already exists"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_location(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<LocationCreate>,
) -> Result<(StatusCode, Json<LocationResponse>)> {
    if request.name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Location name cannot be empty".to_string(),
        });
    }

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Locations::new(&mut pool_conn);

    let location = repo
        .create(&LocationCreateDBRequest {
            user_id: current_user.id,
            name: request.name,
            address: request.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(LocationResponse::from(location))))
}

/// Update an office location
#[utoipa::path(
    patch,
    path = "/locations/{id}",
    request_body = LocationUpdate,
    tag = "locations",
    params(
        ("id" = uuid::Uuid, Path, description = "Location ID"),
    ),
    responses(
        (status = 200, description = "Location updated", body = LocationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Location not found"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<LocationId>,
    current_user: CurrentUser,
    Json(request): Json<LocationUpdate>,
) -> Result<Json<LocationResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Locations::new(&mut pool_conn);

    let location = repo
        .update_for_user(
            id,
            current_user.id,
            &LocationUpdateDBRequest {
                name: request.name,
                address: request.address,
            },
        )
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::NotFound {
                resource: "Location".to_string(),
                id: id.to_string(),
            },
            other => Error::Database(other),
        })?;

    Ok(Json(LocationResponse::from(location)))
}

/// Delete an office location
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    tag = "locations",
    params(
        ("id" = uuid::Uuid, Path, description = "Location ID"),
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Location not found"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<LocationId>,
    current_user: CurrentUser,
) -> Result<StatusCode> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Locations::new(&mut pool_conn);

    let deleted = repo.delete_for_user(id, current_user.id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Location".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::locations::DEFAULT_LOCATION_NAME;
    use crate::test_utils::{create_test_server, create_test_user_session};
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_first_list_returns_main_office(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let response = server.get("/api/v1/locations").add_header("authorization", bearer).await;
        response.assert_status_ok();

        let body: Vec<LocationResponse> = response.json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].name, DEFAULT_LOCATION_NAME);
    }

    #[sqlx::test]
    async fn test_create_update_delete_location(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_user, bearer) = create_test_user_session(&pool).await;

        let response = server
            .post("/api/v1/locations")
            .add_header("authorization", bearer.clone())
            .json(&LocationCreate {
                name: "Warehouse".to_string(),
                address: "1 Dock Rd".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: LocationResponse = response.json();

        let response = server
            .patch(&format!("/api/v1/locations/{}", created.id))
            .add_header("authorization", bearer.clone())
            .json(&LocationUpdate {
                name: None,
                address: Some("2 Dock Rd".to_string()),
            })
            .await;
        response.assert_status_ok();
        let updated: LocationResponse = response.json();
        assert_eq!(updated.address, "2 Dock Rd");

        let response = server
            .delete(&format!("/api/v1/locations/{}", created.id))
            .add_header("authorization", bearer)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    #[sqlx::test]
    async fn test_locations_scoped_per_user(pool: PgPool) {
        let server = create_test_server(pool.clone()).await;
        let (_alice, alice_bearer) = create_test_user_session(&pool).await;
        let (_bob, bob_bearer) = create_test_user_session(&pool).await;

        let response = server
            .post("/api/v1/locations")
            .add_header("authorization", alice_bearer)
            .json(&LocationCreate {
                name: "Alice HQ".to_string(),
                address: "".to_string(),
            })
            .await;
        let created: LocationResponse = response.json();

        // Bob cannot delete Alice's location
        let response = server
            .delete(&format!("/api/v1/locations/{}", created.id))
            .add_header("authorization", bob_bearer)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
