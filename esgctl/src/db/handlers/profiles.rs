//! Database repository for company profiles.
//!
//! One row per user, written via upsert on the `user_id` conflict key; the
//! application never partially updates a profile.

use crate::db::{
    errors::Result,
    models::profiles::{ProfileDBResponse, ProfileUpsertDBRequest},
};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Profiles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Profiles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_for_user(&mut self, user_id: UserId) -> Result<Option<ProfileDBResponse>> {
        let profile = sqlx::query_as::<_, ProfileDBResponse>("SELECT * FROM company_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(profile)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    pub async fn upsert(&mut self, request: &ProfileUpsertDBRequest) -> Result<ProfileDBResponse> {
        let profile = sqlx::query_as::<_, ProfileDBResponse>(
            r#"
            INSERT INTO company_profiles (user_id, company_name, industry, company_size, reporting_framework, country)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                industry = EXCLUDED.industry,
                company_size = EXCLUDED.company_size,
                reporting_framework = EXCLUDED.reporting_framework,
                country = EXCLUDED.country,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.company_name)
        .bind(&request.industry)
        .bind(&request.company_size)
        .bind(&request.reporting_framework)
        .bind(&request.country)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::{Repository, Users};
    use crate::db::models::users::UserCreateDBRequest;
    use sqlx::PgPool;

    async fn create_user(pool: &PgPool) -> UserId {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        let user = users
            .create(&UserCreateDBRequest {
                username: "profileuser".to_string(),
                email: "profile@example.com".to_string(),
                display_name: None,
                is_admin: false,
                auth_source: "native".to_string(),
                password_hash: None,
            })
            .await
            .unwrap();
        user.id
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_profile_absent_then_upserted(pool: PgPool) {
        let user_id = create_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Profiles::new(&mut conn);

        assert!(repo.get_for_user(user_id).await.unwrap().is_none());

        let created = repo
            .upsert(&ProfileUpsertDBRequest {
                user_id,
                company_name: "Acme Widgets".to_string(),
                industry: Some("Manufacturing".to_string()),
                company_size: Some("11-50".to_string()),
                reporting_framework: None,
                country: Some("Australia".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.company_name, "Acme Widgets");

        // Second upsert replaces the whole row, leaving exactly one
        let replaced = repo
            .upsert(&ProfileUpsertDBRequest {
                user_id,
                company_name: "Acme Holdings".to_string(),
                industry: None,
                company_size: None,
                reporting_framework: Some("GRI".to_string()),
                country: None,
            })
            .await
            .unwrap();
        assert_eq!(replaced.company_name, "Acme Holdings");
        assert_eq!(replaced.industry, None);
        assert_eq!(replaced.reporting_framework, Some("GRI".to_string()));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM company_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
