//! # esgctl: ESG Data Collection & Reporting Platform
//!
//! `esgctl` is a self-hostable service for collecting and reporting ESG
//! (Environmental, Social, Governance) data. It provides a RESTful API for
//! per-category emission records, company profiles, and office locations,
//! a static marketplace/funding directory, an OAuth bridge to a third-party
//! accounting provider, and transactional email - all behind one binary that
//! also serves the dashboard frontend.
//!
//! ## Overview
//!
//! Organizations reporting under the GHG Protocol collect emission data
//! source by source: stationary and mobile combustion, process emissions,
//! refrigerants, and value-chain categories like waste, paper, and water.
//! `esgctl` owns that data-entry workflow. Each category holds a small set
//! of line items per user; saves replace the whole set atomically, and a
//! category that does not apply to the organization is recorded as a single
//! sentinel row rather than a separate flag.
//!
//! Alongside data entry, the service exposes a build-time directory of
//! sustainability vendors and funding programs with server-side filtering
//! and pagination, and connects user accounts to their accounting provider
//! tenants through a two-action OAuth bridge (authorize, then callback) so
//! downstream tooling can pull financial activity for estimation.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for all persistence needs. It can
//! operate with either an embedded PostgreSQL instance (useful for
//! development) or an external PostgreSQL database (recommended for
//! production).
//!
//! Requests flow through authentication (session cookie or bearer JWT) into
//! handlers, which use repository interfaces from [`db`] for all data
//! access. Multi-statement writes - the record-set replacement that backs
//! every emission save, and the lazy office-location default - run inside
//! database transactions so clients never observe partial state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use esgctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = esgctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize telemetry (structured logging)
//!     esgctl::telemetry::init_telemetry()?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod accounting;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
mod email;
pub mod errors;
mod openapi;
mod static_assets;
pub mod telemetry;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::{
    auth::password,
    db::handlers::{Repository, Users},
    db::models::users::UserCreateDBRequest,
    openapi::ApiDoc,
};
use axum::http::HeaderValue;
use axum::{
    Router, http,
    routing::{delete, get, patch, post, put},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use config::CorsOrigin;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{ConnectionId, EmissionRecordId, LocationId, StateTokenId, UserId};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: PostgreSQL connection pool for application data
/// - `config`: Application configuration loaded from environment/files
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the esgctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// This function is idempotent - it will create a new admin user if one
/// doesn't exist, or update the password if the user already exists. It is
/// called during application startup to ensure there's always an admin user
/// available.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, db: &PgPool) -> anyhow::Result<UserId> {
    // Hash password if provided
    let password_hash = if let Some(pwd) = password {
        Some(password::hash_string(pwd).map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?)
    } else {
        None
    };

    // Use a transaction to ensure atomicity
    let mut tx = db.begin().await?;
    let mut user_repo = Users::new(&mut tx);

    // Check if user already exists
    if let Some(existing_user) = user_repo
        .get_user_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to check existing user: {e}"))?
    {
        // User exists - update password if provided
        if let Some(password_hash) = password_hash {
            sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
                .bind(password_hash)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        return Ok(existing_user.id);
    }

    // Create new admin user
    let user_create = UserCreateDBRequest {
        username: email.to_string(),
        email: email.to_string(),
        display_name: None,
        is_admin: true,
        auth_source: "system".to_string(),
        password_hash,
    };

    let created_user = user_repo
        .create(&user_create)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create admin user: {e}"))?;

    tx.commit().await?;
    Ok(created_user.id)
}

#[cfg(feature = "embedded-db")]
type MaybeEmbedded = Option<db::embedded::EmbeddedDatabase>;
#[cfg(not(feature = "embedded-db"))]
type MaybeEmbedded = Option<()>;

/// Setup database connections, run migrations, and seed the admin user
async fn setup_database(config: &Config) -> anyhow::Result<(MaybeEmbedded, PgPool)> {
    // Database connection - handle both embedded and external
    let (_embedded_db, database_url): (MaybeEmbedded, String) = match &config.database {
        config::DatabaseConfig::Embedded { .. } => {
            let persistent = config.database.embedded_persistent();
            info!("Starting with embedded database (persistent: {})", persistent);
            if !persistent {
                info!("persistent=false: database will be ephemeral and data will be lost on shutdown");
            }
            #[cfg(feature = "embedded-db")]
            {
                let data_dir = config.database.embedded_data_dir();
                let embedded_db = db::embedded::EmbeddedDatabase::start(data_dir, persistent).await?;
                let url = embedded_db.connection_string().to_string();
                (Some(embedded_db), url)
            }
            #[cfg(not(feature = "embedded-db"))]
            {
                anyhow::bail!(
                    "Embedded database is configured but the feature is not enabled. \
                     Rebuild with --features embedded-db to use embedded database."
                );
            }
        }
        config::DatabaseConfig::External { url, .. } => {
            info!("Using external database");
            (None, url.clone())
        }
    };

    let pool_settings = config.database.pool_settings();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .min_connections(pool_settings.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(pool_settings.acquire_timeout_secs))
        .connect(&database_url)
        .await?;

    migrator().run(&pool).await?;

    // Create initial admin user if it doesn't exist
    create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create initial admin user: {}", e))?;

    Ok((_embedded_db, pool))
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.security.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.security.cors.allow_credentials)
        .allow_headers(vec![http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .allow_methods(vec![
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::PATCH,
            http::Method::DELETE,
        ]);

    if let Some(max_age) = config.auth.security.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - Authentication routes (login, registration, password change)
/// - Application API routes under `/api/v1`
/// - Static asset serving and SPA fallback
/// - Optional Prometheus metrics
/// - CORS configuration
/// - Tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    // Authentication routes (at root level)
    let auth_routes = Router::new()
        .route(
            "/authentication/register",
            get(api::handlers::auth::get_registration_info).post(api::handlers::auth::register),
        )
        .route("/authentication/login", post(api::handlers::auth::login))
        .route("/authentication/logout", post(api::handlers::auth::logout))
        .route("/authentication/password-change", post(api::handlers::auth::change_password))
        .with_state(state.clone());

    // Application API routes
    let api_routes = Router::new()
        .route("/config", get(api::handlers::config::get_config))
        // User management
        .route("/users", get(api::handlers::users::list_users))
        .route("/users/me", get(api::handlers::users::get_me))
        // Company profile
        .route(
            "/profile",
            get(api::handlers::profiles::get_profile).put(api::handlers::profiles::upsert_profile),
        )
        // Office locations
        .route("/locations", get(api::handlers::locations::list_locations))
        .route("/locations", post(api::handlers::locations::create_location))
        .route("/locations/{id}", patch(api::handlers::locations::update_location))
        .route("/locations/{id}", delete(api::handlers::locations::delete_location))
        // Emission records per category
        .route("/emissions/{category}", get(api::handlers::emissions::get_category_records))
        .route("/emissions/{category}", put(api::handlers::emissions::save_category_records))
        // Directories
        .route("/directory/marketplace", get(api::handlers::directory::list_marketplace))
        .route("/directory/funding", get(api::handlers::directory::list_funding))
        // Accounting OAuth bridge
        .route("/integrations/accounting", post(api::handlers::integrations::accounting_bridge))
        .route(
            "/integrations/accounting/connections",
            get(api::handlers::integrations::list_connections),
        )
        // Email function
        .route("/emails/welcome", post(api::handlers::emails::send_welcome_email))
        .with_state(state.clone());

    // Serve embedded static assets, falling back to SPA for unmatched routes
    let fallback = get(api::handlers::static_assets::serve_embedded_asset).fallback(api::handlers::static_assets::spa_fallback);

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback_service(fallback);

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;
    let mut router = router.layer(cors_layer);

    // Add Prometheus metrics if enabled
    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] initializes all resources, runs
///    migrations, and seeds the initial admin user
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts
///    handling requests
/// 3. **Shutdown**: When the shutdown signal is received, the server drains
///    and database resources are released
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
    _embedded_db: MaybeEmbedded,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        tracing::debug!("Starting esgctl with configuration: {:#?}", config);

        // Setup database connections, run migrations, and initialize data
        let (_embedded_db, pool) = setup_database(&config).await?;

        // Build app state and router
        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            config,
            pool,
            _embedded_db,
        })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "esgctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        // Clean up embedded database if it exists
        #[cfg(feature = "embedded-db")]
        if let Some(embedded_db) = self._embedded_db {
            info!("Shutting down embedded database...");
            embedded_db.stop().await?;
        }

        Ok(())
    }
}
