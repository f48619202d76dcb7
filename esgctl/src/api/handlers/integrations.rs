use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};

use crate::{
    AppState,
    accounting::AccountingClient,
    api::models::{
        integrations::{AuthUrlResponse, BridgeRequest, CallbackResponse, ConnectionResponse},
        users::CurrentUser,
    },
    db::{
        handlers::{Connections, OAuthStates},
        models::connections::{ConnectionUpsertDBRequest, OrganisationUpsertDBRequest},
    },
    errors::{Error, Result},
};

/// Accounting OAuth bridge: one endpoint, two actions
///
/// `{"action": "auth"}` returns a provider authorization URL with a fresh
/// one-shot state token. `{"action": "callback", "code", "state"}` verifies
/// and consumes the state, exchanges the code, and upserts one connection
/// per authorized tenant. A rejected code surfaces the provider's raw error
/// body and writes nothing.
#[utoipa::path(
    post,
    path = "/integrations/accounting",
    request_body = BridgeRequest,
    tag = "integrations",
    responses(
        (status = 200, description = "Authorization URL or callback result", body = CallbackResponse),
        (status = 400, description = "Invalid request or state token"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Provider rejected the exchange; body carries the provider error"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn accounting_bridge(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<BridgeRequest>,
) -> Result<Response> {
    let Some(accounting_config) = state.config.accounting.clone() else {
        return Err(Error::BadRequest {
            message: "Accounting integration is not configured".to_string(),
        });
    };
    let state_token_duration = accounting_config.state_token_duration;
    let client = AccountingClient::new(accounting_config);

    match request {
        BridgeRequest::Auth => {
            let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
            let mut states = OAuthStates::new(&mut pool_conn);

            let (state_token, _row) = states.create_for_user(current_user.id, state_token_duration).await?;
            let auth_url = client.authorize_url(&state_token);

            Ok(Json(AuthUrlResponse {
                auth_url,
                state: state_token,
            })
            .into_response())
        }
        BridgeRequest::Callback { code, state: state_token } => {
            let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

            // Verify and consume the state before touching the provider
            let mut states = OAuthStates::new(&mut pool_conn);
            if !states.consume(current_user.id, &state_token).await? {
                return Err(Error::BadRequest {
                    message: "Invalid or expired state token".to_string(),
                });
            }

            // Exchange the code. A provider rejection stops here; no
            // connection rows have been touched yet.
            let tokens = client.exchange_code(&code).await?;
            let expires_at = Utc::now() + Duration::seconds(tokens.expires_in);

            let tenants = client.list_tenants(&tokens.access_token).await?;

            let mut connections = Connections::new(&mut pool_conn);
            let mut processed = 0usize;
            for tenant in &tenants {
                connections
                    .upsert(&ConnectionUpsertDBRequest {
                        user_id: current_user.id,
                        tenant_id: tenant.tenant_id.clone(),
                        tenant_name: tenant.tenant_name.clone().unwrap_or_default(),
                        tenant_type: tenant.tenant_type.clone(),
                        access_token: tokens.access_token.clone(),
                        refresh_token: tokens.refresh_token.clone(),
                        expires_at,
                    })
                    .await?;
                processed += 1;

                // Organisation metadata is best-effort: a fetch failure is
                // logged and skipped, never failing the callback
                match client.get_organisation(&tokens.access_token, &tenant.tenant_id).await {
                    Ok(Some(organisation)) => {
                        if let Err(e) = connections
                            .upsert_organisation(&OrganisationUpsertDBRequest {
                                user_id: current_user.id,
                                tenant_id: tenant.tenant_id.clone(),
                                name: organisation.name,
                                legal_name: organisation.legal_name,
                                country: organisation.country_code,
                                organisation_type: organisation.organisation_type,
                            })
                            .await
                        {
                            tracing::warn!("Failed to store organisation for tenant {}: {}", tenant.tenant_id, e);
                        }
                    }
                    Ok(None) => {
                        tracing::debug!("No organisation metadata for tenant {}", tenant.tenant_id);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch organisation for tenant {}: {}", tenant.tenant_id, e);
                    }
                }
            }

            Ok(Json(CallbackResponse {
                success: true,
                connections: processed,
            })
            .into_response())
        }
    }
}

/// List the current user's accounting connections
#[utoipa::path(
    get,
    path = "/integrations/accounting/connections",
    tag = "integrations",
    responses(
        (status = 200, description = "Connected tenants", body = [ConnectionResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_connections(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<ConnectionResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Connections::new(&mut pool_conn);

    let connections = repo.list_for_user(current_user.id).await?;
    Ok(Json(connections.into_iter().map(ConnectionResponse::from).collect()))
}
