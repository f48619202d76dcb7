use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{AppState, errors::Result};

/// Frontend-facing configuration
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FrontendConfig {
    pub organization: Option<String>,
    pub docs_url: String,
    pub title: Option<String>,
    pub registration_enabled: bool,
    pub accounting_integration_enabled: bool,
}

/// Get frontend metadata and feature flags
#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    responses(
        (status = 200, description = "Frontend configuration", body = FrontendConfig),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_config(State(state): State<AppState>) -> Result<Json<FrontendConfig>> {
    Ok(Json(FrontendConfig {
        organization: state.config.metadata.organization.clone(),
        docs_url: state.config.metadata.docs_url.clone(),
        title: state.config.metadata.title.clone(),
        registration_enabled: state.config.auth.native.enabled && state.config.auth.native.allow_registration,
        accounting_integration_enabled: state.config.accounting.is_some(),
    }))
}
