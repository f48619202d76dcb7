//! Database repository for office locations.

use crate::db::{
    errors::{DbError, Result},
    models::locations::{DEFAULT_LOCATION_NAME, LocationCreateDBRequest, LocationDBResponse, LocationUpdateDBRequest},
};
use crate::types::{LocationId, UserId, abbrev_uuid};
use sqlx::{Connection, PgConnection};
use tracing::instrument;

pub struct Locations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Locations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    pub async fn create(&mut self, request: &LocationCreateDBRequest) -> Result<LocationDBResponse> {
        let location = sqlx::query_as::<_, LocationDBResponse>(
            r#"
            INSERT INTO office_locations (user_id, name, address)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.name)
        .bind(&request.address)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(location)
    }

    /// List the user's locations, creating the default "Main Office" first if
    /// the user has none. The check and the insert share a transaction so a
    /// concurrent first read cannot create two defaults.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_with_default(&mut self, user_id: UserId) -> Result<Vec<LocationDBResponse>> {
        let mut tx = self.db.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM office_locations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        if count == 0 {
            sqlx::query(
                "INSERT INTO office_locations (user_id, name, address) VALUES ($1, $2, '')
                 ON CONFLICT (user_id, name) DO NOTHING",
            )
            .bind(user_id)
            .bind(DEFAULT_LOCATION_NAME)
            .execute(&mut *tx)
            .await?;
        }

        let locations = sqlx::query_as::<_, LocationDBResponse>(
            "SELECT * FROM office_locations WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(locations)
    }

    #[instrument(skip(self), fields(location_id = %abbrev_uuid(&id)), err)]
    pub async fn get_for_user(&mut self, id: LocationId, user_id: UserId) -> Result<Option<LocationDBResponse>> {
        let location =
            sqlx::query_as::<_, LocationDBResponse>("SELECT * FROM office_locations WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(location)
    }

    #[instrument(skip(self, request), fields(location_id = %abbrev_uuid(&id)), err)]
    pub async fn update_for_user(
        &mut self,
        id: LocationId,
        user_id: UserId,
        request: &LocationUpdateDBRequest,
    ) -> Result<LocationDBResponse> {
        let location = sqlx::query_as::<_, LocationDBResponse>(
            r#"
            UPDATE office_locations SET
                name = COALESCE($3, name),
                address = COALESCE($4, address),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.address)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(location)
    }

    #[instrument(skip(self), fields(location_id = %abbrev_uuid(&id)), err)]
    pub async fn delete_for_user(&mut self, id: LocationId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM office_locations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
