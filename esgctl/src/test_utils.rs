//! Test utilities for integration testing.

use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    AppState,
    api::models::users::{CurrentUser, UserResponse},
    auth::session,
    config::{Config, DatabaseConfig, EmailTransportConfig, PoolSettings},
    db::{
        handlers::{Repository, Users},
        models::users::UserCreateDBRequest,
    },
};

pub fn create_test_config() -> Config {
    // Use temp directory for test emails
    let temp_dir = std::env::temp_dir().join(format!("esgctl-test-emails-{}", std::process::id()));

    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        // Overridden by the pool handed to AppState in tests
        database: DatabaseConfig::External {
            url: "postgres://localhost:5432/esgctl_test".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                ..Default::default()
            },
        },
        admin_email: "admin@test.com".to_string(),
        admin_password: None,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        enable_metrics: false,
        ..Default::default()
    };
    config.auth.native.enabled = true;
    config.auth.native.allow_registration = true;
    config.email.transport = EmailTransportConfig::File {
        path: temp_dir.to_string_lossy().to_string(),
    };
    config
}

/// Build a test server over the full application router.
pub async fn create_test_server(pool: PgPool) -> TestServer {
    create_test_server_with_config(pool, create_test_config()).await
}

/// Build a test server over the full application router with a custom config.
///
/// The config's `secret_key` should stay at the test default so session
/// helpers below produce verifiable tokens.
pub async fn create_test_server_with_config(pool: PgPool, config: Config) -> TestServer {
    let state = AppState::builder().db(pool).config(config).build();
    let router = crate::build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

async fn create_user(pool: &PgPool, is_admin: bool) -> UserResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users_repo = Users::new(&mut conn);
    let unique = Uuid::new_v4().simple().to_string();
    let username = format!("testuser_{unique}");
    let email = format!("{username}@example.com");

    let user_create = UserCreateDBRequest {
        username,
        email,
        display_name: Some("Test User".to_string()),
        is_admin,
        auth_source: "test".to_string(),
        password_hash: None,
    };

    let user = users_repo.create(&user_create).await.expect("Failed to create test user");
    UserResponse::from(user)
}

fn bearer_for(user: &UserResponse) -> String {
    let config = create_test_config();
    let current_user = CurrentUser {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
        display_name: user.display_name.clone(),
    };
    let token = session::create_session_token(&current_user, &config).expect("Failed to create session token");
    format!("Bearer {token}")
}

/// Create a user and return it with an `Authorization` header value.
pub async fn create_test_user_session(pool: &PgPool) -> (UserResponse, String) {
    let user = create_user(pool, false).await;
    let bearer = bearer_for(&user);
    (user, bearer)
}

/// Create an admin user and return it with an `Authorization` header value.
pub async fn create_test_admin_session(pool: &PgPool) -> (UserResponse, String) {
    let user = create_user(pool, true).await;
    let bearer = bearer_for(&user);
    (user, bearer)
}
