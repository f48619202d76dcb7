//! Database repository for one-shot OAuth state tokens.
//!
//! The state value handed to the client is `<row id>.<raw token>`; only the
//! argon2 hash of the raw token is stored. Verification consumes the row, so
//! a state can authorize at most one callback.

use chrono::Utc;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::password;
use crate::db::{
    errors::{DbError, Result},
    models::oauth_states::OAuthStateDBResponse,
};
use crate::types::{UserId, abbrev_uuid};

pub struct OAuthStates<'c> {
    db: &'c mut PgConnection,
}

impl<'c> OAuthStates<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Create a state token for a user, returning the opaque client-facing
    /// state string alongside the stored row.
    #[instrument(skip(self, valid_for), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn create_for_user(
        &mut self,
        user_id: UserId,
        valid_for: std::time::Duration,
    ) -> Result<(String, OAuthStateDBResponse)> {
        let raw_token = password::generate_state_token();
        let token_hash = password::hash_string(&raw_token).map_err(|e| DbError::Other(anyhow::anyhow!(e)))?;
        let expires_at =
            Utc::now() + chrono::Duration::from_std(valid_for).unwrap_or(chrono::Duration::minutes(10));

        let row = sqlx::query_as::<_, OAuthStateDBResponse>(
            r#"
            INSERT INTO oauth_states (user_id, state_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&mut *self.db)
        .await?;

        let state = format!("{}.{}", row.id, raw_token);
        Ok((state, row))
    }

    /// Verify a client-supplied state string for a user and consume it.
    /// Returns false for unknown, expired, already-used, or mismatched states.
    #[instrument(skip(self, state), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn consume(&mut self, user_id: UserId, state: &str) -> Result<bool> {
        let Some((id_part, raw_token)) = state.split_once('.') else {
            return Ok(false);
        };
        let Ok(state_id) = id_part.parse::<Uuid>() else {
            return Ok(false);
        };

        let row = sqlx::query_as::<_, OAuthStateDBResponse>("SELECT * FROM oauth_states WHERE id = $1")
            .bind(state_id)
            .fetch_optional(&mut *self.db)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };

        if row.user_id != user_id || row.used_at.is_some() || Utc::now() > row.expires_at {
            return Ok(false);
        }

        match password::verify_string(raw_token, &row.state_hash) {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(e) => {
                tracing::error!("State token verification error for {}: {:?}", state_id, e);
                return Ok(false);
            }
        }

        // Consume: only the first verifier wins
        let result = sqlx::query("UPDATE oauth_states SET used_at = NOW() WHERE id = $1 AND used_at IS NULL")
            .bind(state_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::{Repository, Users};
    use crate::db::models::users::UserCreateDBRequest;
    use sqlx::PgPool;
    use std::time::Duration;

    async fn create_user(pool: &PgPool, email: &str) -> UserId {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        let user = users
            .create(&UserCreateDBRequest {
                username: email.to_string(),
                email: email.to_string(),
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
    async fn test_state_round_trip(pool: PgPool) {
        let user_id = create_user(&pool, "state@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = OAuthStates::new(&mut conn);

        let (state, _row) = repo.create_for_user(user_id, Duration::from_secs(600)).await.unwrap();

        assert!(repo.consume(user_id, &state).await.unwrap());

        // One-shot: a second consume fails
        assert!(!repo.consume(user_id, &state).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_state_rejected_for_other_user(pool: PgPool) {
        let owner = create_user(&pool, "owner-state@example.com").await;
        let other = create_user(&pool, "other-state@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = OAuthStates::new(&mut conn);

        let (state, _row) = repo.create_for_user(owner, Duration::from_secs(600)).await.unwrap();

        assert!(!repo.consume(other, &state).await.unwrap());
        // Still valid for the owner afterwards
        assert!(repo.consume(owner, &state).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_expired_state_rejected(pool: PgPool) {
        let user_id = create_user(&pool, "expired-state@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = OAuthStates::new(&mut conn);

        let (state, _row) = repo.create_for_user(user_id, Duration::from_secs(0)).await.unwrap();

        assert!(!repo.consume(user_id, &state).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_malformed_state_rejected(pool: PgPool) {
        let user_id = create_user(&pool, "malformed-state@example.com").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = OAuthStates::new(&mut conn);

        assert!(!repo.consume(user_id, "no-separator").await.unwrap());
        assert!(!repo.consume(user_id, "not-a-uuid.token").await.unwrap());
        let (state, _row) = repo.create_for_user(user_id, Duration::from_secs(600)).await.unwrap();
        let tampered = format!("{}x", state);
        assert!(!repo.consume(user_id, &tampered).await.unwrap());
    }
}
