//! Database repository for accounting connections and organisation metadata.

use crate::db::{
    errors::Result,
    models::connections::{
        ConnectionDBResponse, ConnectionUpsertDBRequest, OrganisationDBResponse, OrganisationUpsertDBRequest,
    },
};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Connections<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Connections<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Upsert a connection keyed on (user_id, tenant_id). Repeated callbacks
    /// for the same tenant refresh the token material in place.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), tenant = %request.tenant_id), err)]
    pub async fn upsert(&mut self, request: &ConnectionUpsertDBRequest) -> Result<ConnectionDBResponse> {
        let connection = sqlx::query_as::<_, ConnectionDBResponse>(
            r#"
            INSERT INTO accounting_connections
                (user_id, tenant_id, tenant_name, tenant_type, access_token, refresh_token, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, tenant_id) DO UPDATE SET
                tenant_name = EXCLUDED.tenant_name,
                tenant_type = EXCLUDED.tenant_type,
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                expires_at = EXCLUDED.expires_at,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.tenant_id)
        .bind(&request.tenant_name)
        .bind(&request.tenant_type)
        .bind(&request.access_token)
        .bind(&request.refresh_token)
        .bind(request.expires_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(connection)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_for_user(&mut self, user_id: UserId) -> Result<Vec<ConnectionDBResponse>> {
        let connections = sqlx::query_as::<_, ConnectionDBResponse>(
            "SELECT * FROM accounting_connections WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(connections)
    }

    /// Upsert organisation metadata keyed on (user_id, tenant_id).
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), tenant = %request.tenant_id), err)]
    pub async fn upsert_organisation(&mut self, request: &OrganisationUpsertDBRequest) -> Result<OrganisationDBResponse> {
        let organisation = sqlx::query_as::<_, OrganisationDBResponse>(
            r#"
            INSERT INTO accounting_organisations
                (user_id, tenant_id, name, legal_name, country, organisation_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, tenant_id) DO UPDATE SET
                name = EXCLUDED.name,
                legal_name = EXCLUDED.legal_name,
                country = EXCLUDED.country,
                organisation_type = EXCLUDED.organisation_type,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.tenant_id)
        .bind(&request.name)
        .bind(&request.legal_name)
        .bind(&request.country)
        .bind(&request.organisation_type)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(organisation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::{Repository, Users};
    use crate::db::models::users::UserCreateDBRequest;
    use chrono::{Duration, Utc};
    use sqlx::PgPool;

    async fn create_user(pool: &PgPool) -> UserId {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        let user = users
            .create(&UserCreateDBRequest {
                username: "connector".to_string(),
                email: "connector@example.com".to_string(),
                display_name: None,
                is_admin: false,
                auth_source: "native".to_string(),
                password_hash: None,
            })
            .await
            .unwrap();
        user.id
    }

    fn connection_request(user_id: UserId, tenant: &str, token: &str) -> ConnectionUpsertDBRequest {
        ConnectionUpsertDBRequest {
            user_id,
            tenant_id: tenant.to_string(),
            tenant_name: "Demo Org".to_string(),
            tenant_type: Some("ORGANISATION".to_string()),
            access_token: token.to_string(),
            refresh_token: format!("refresh-{token}"),
            expires_at: Utc::now() + Duration::minutes(30),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_upsert_refreshes_in_place(pool: PgPool) {
        let user_id = create_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Connections::new(&mut conn);

        let first = repo.upsert(&connection_request(user_id, "tenant-1", "tok-a")).await.unwrap();
        let second = repo.upsert(&connection_request(user_id, "tenant-1", "tok-b")).await.unwrap();

        // Same row, refreshed token
        assert_eq!(first.id, second.id);
        assert_eq!(second.access_token, "tok-b");

        let connections = repo.list_for_user(user_id).await.unwrap();
        assert_eq!(connections.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_multiple_tenants_per_user(pool: PgPool) {
        let user_id = create_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Connections::new(&mut conn);

        repo.upsert(&connection_request(user_id, "tenant-1", "tok-a")).await.unwrap();
        repo.upsert(&connection_request(user_id, "tenant-2", "tok-b")).await.unwrap();

        let connections = repo.list_for_user(user_id).await.unwrap();
        assert_eq!(connections.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_organisation_upsert(pool: PgPool) {
        let user_id = create_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Connections::new(&mut conn);

        let request = OrganisationUpsertDBRequest {
            user_id,
            tenant_id: "tenant-1".to_string(),
            name: "Demo Org".to_string(),
            legal_name: Some("Demo Org Pty Ltd".to_string()),
            country: Some("AU".to_string()),
            organisation_type: Some("COMPANY".to_string()),
        };

        repo.upsert_organisation(&request).await.unwrap();
        let updated = repo
            .upsert_organisation(&OrganisationUpsertDBRequest {
                name: "Demo Org Renamed".to_string(),
                ..request
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Demo Org Renamed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounting_organisations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
