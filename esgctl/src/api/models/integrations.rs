//! API models for the accounting OAuth bridge.

use crate::db::models::connections::ConnectionDBResponse;
use crate::types::ConnectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The bridge's two-action request contract on a single endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BridgeRequest {
    /// Request a provider authorization URL with a fresh state token
    Auth,
    /// Complete the handshake with the provider's code and our state token
    Callback { code: String, state: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthUrlResponse {
    pub auth_url: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallbackResponse {
    pub success: bool,
    /// Number of tenant connections created or refreshed
    pub connections: usize,
}

/// A connected tenant, with token material omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConnectionResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ConnectionId,
    pub tenant_id: String,
    pub tenant_name: String,
    pub tenant_type: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConnectionDBResponse> for ConnectionResponse {
    fn from(db: ConnectionDBResponse) -> Self {
        Self {
            id: db.id,
            tenant_id: db.tenant_id,
            tenant_name: db.tenant_name,
            tenant_type: db.tenant_type,
            expires_at: db.expires_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Request body for the welcome-email function.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeEmailRequest {
    pub email: String,
    pub name: Option<String>,
    pub site_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeEmailResponse {
    pub message: String,
}
