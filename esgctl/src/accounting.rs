//! Typed client for the accounting provider's OAuth and tenant APIs.
//!
//! The bridge flow is a single pass: exchange the authorization code for a
//! token pair, list the tenants that pair authorizes, then fetch organisation
//! metadata per tenant. There is no retry or backoff; each call either
//! succeeds or fails once and is reported.

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::config::AccountingConfig;
use crate::errors::Error;

/// Errors from the accounting provider.
#[derive(Debug, thiserror::Error)]
pub enum AccountingError {
    /// The provider rejected the token exchange; carries the raw error body
    #[error("token exchange failed with status {status}")]
    TokenExchange { status: StatusCode, body: String },

    /// Transport-level failure talking to the provider
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a payload we could not interpret
    #[error("unexpected provider payload: {0}")]
    InvalidPayload(String),
}

impl From<AccountingError> for Error {
    fn from(err: AccountingError) -> Self {
        match err {
            AccountingError::TokenExchange { status, body } => Error::Integration {
                message: format!("Token exchange failed with status {status}"),
                details: Some(body),
            },
            AccountingError::Http(e) => Error::Integration {
                message: format!("Accounting provider request failed: {e}"),
                details: None,
            },
            AccountingError::InvalidPayload(message) => Error::Integration {
                message: format!("Accounting provider returned an unexpected payload: {message}"),
                details: None,
            },
        }
    }
}

/// Access/refresh token pair from a successful exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
}

/// One tenant (provider organization unit) the token pair authorizes.
#[derive(Debug, Clone, Deserialize)]
pub struct Tenant {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "tenantName", default)]
    pub tenant_name: Option<String>,
    #[serde(rename = "tenantType", default)]
    pub tenant_type: Option<String>,
}

/// Organisation metadata for a connected tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct Organisation {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LegalName", default)]
    pub legal_name: Option<String>,
    #[serde(rename = "CountryCode", default)]
    pub country_code: Option<String>,
    #[serde(rename = "OrganisationType", default)]
    pub organisation_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganisationEnvelope {
    #[serde(rename = "Organisations", default)]
    organisations: Vec<Organisation>,
}

pub struct AccountingClient {
    http: reqwest::Client,
    config: AccountingConfig,
}

impl AccountingClient {
    pub fn new(config: AccountingConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Build the provider authorization URL for a state token.
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url: Url = self.config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("scope", &self.config.scopes)
            .append_pair("state", state);
        url.to_string()
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// A non-2xx answer is returned with the provider's raw body so callers
    /// can surface it verbatim. Codes are single-use at the provider, so a
    /// repeated callback fails here.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, AccountingError> {
        let response = self
            .http
            .post(self.config.token_url.clone())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccountingError::TokenExchange { status, body });
        }

        let tokens = response
            .json::<TokenSet>()
            .await
            .map_err(|e| AccountingError::InvalidPayload(format!("token response: {e}")))?;
        Ok(tokens)
    }

    /// List the tenants an access token authorizes.
    pub async fn list_tenants(&self, access_token: &str) -> Result<Vec<Tenant>, AccountingError> {
        let response = self
            .http
            .get(self.config.connections_url.clone())
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccountingError::InvalidPayload(format!(
                "connections listing returned {status}: {body}"
            )));
        }

        let tenants = response
            .json::<Vec<Tenant>>()
            .await
            .map_err(|e| AccountingError::InvalidPayload(format!("connections response: {e}")))?;
        Ok(tenants)
    }

    /// Fetch organisation metadata for one tenant.
    pub async fn get_organisation(
        &self,
        access_token: &str,
        tenant_id: &str,
    ) -> Result<Option<Organisation>, AccountingError> {
        let response = self
            .http
            .get(self.config.organisation_url.clone())
            .bearer_auth(access_token)
            .header("xero-tenant-id", tenant_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccountingError::InvalidPayload(format!(
                "organisation fetch returned {status}: {body}"
            )));
        }

        let envelope = response
            .json::<OrganisationEnvelope>()
            .await
            .map_err(|e| AccountingError::InvalidPayload(format!("organisation response: {e}")))?;
        Ok(envelope.organisations.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server_uri: &str) -> AccountingConfig {
        AccountingConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            auth_url: Url::parse(&format!("{server_uri}/identity/connect/authorize")).unwrap(),
            token_url: Url::parse(&format!("{server_uri}/connect/token")).unwrap(),
            connections_url: Url::parse(&format!("{server_uri}/connections")).unwrap(),
            organisation_url: Url::parse(&format!("{server_uri}/api.xro/2.0/Organisation")).unwrap(),
            redirect_uri: Url::parse("https://app.example.com/integrations/callback").unwrap(),
            scopes: "openid offline_access".to_string(),
            state_token_duration: std::time::Duration::from_secs(600),
        }
    }

    #[test]
    fn test_authorize_url_contains_params() {
        let config = test_config("https://provider.example.com");
        let client = AccountingClient::new(config);

        let url = client.authorize_url("my-state");
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("state=my-state"));
        assert!(url.contains("scope=openid+offline_access"));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=good-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access-123",
                "refresh_token": "refresh-456",
                "expires_in": 1800,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AccountingClient::new(test_config(&server.uri()));
        let tokens = client.exchange_code("good-code").await.unwrap();

        assert_eq!(tokens.access_token, "access-123");
        assert_eq!(tokens.refresh_token, "refresh-456");
        assert_eq!(tokens.expires_in, 1800);
    }

    #[tokio::test]
    async fn test_exchange_code_failure_carries_provider_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
            .mount(&server)
            .await;

        let client = AccountingClient::new(test_config(&server.uri()));
        let err = client.exchange_code("used-code").await.unwrap_err();

        match err {
            AccountingError::TokenExchange { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("expected TokenExchange error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_tenants() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/connections"))
            .and(header("authorization", "Bearer access-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"tenantId": "t-1", "tenantName": "Demo Org", "tenantType": "ORGANISATION"},
                {"tenantId": "t-2"}
            ])))
            .mount(&server)
            .await;

        let client = AccountingClient::new(test_config(&server.uri()));
        let tenants = client.list_tenants("access-123").await.unwrap();

        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants[0].tenant_id, "t-1");
        assert_eq!(tenants[0].tenant_name.as_deref(), Some("Demo Org"));
        assert_eq!(tenants[1].tenant_name, None);
    }

    #[tokio::test]
    async fn test_get_organisation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.xro/2.0/Organisation"))
            .and(header("xero-tenant-id", "t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Organisations": [
                    {"Name": "Demo Org", "LegalName": "Demo Org Pty Ltd", "CountryCode": "AU"}
                ]
            })))
            .mount(&server)
            .await;

        let client = AccountingClient::new(test_config(&server.uri()));
        let organisation = client.get_organisation("access-123", "t-1").await.unwrap().unwrap();

        assert_eq!(organisation.name, "Demo Org");
        assert_eq!(organisation.country_code.as_deref(), Some("AU"));
    }

    #[tokio::test]
    async fn test_get_organisation_empty_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.xro/2.0/Organisation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Organisations": []})))
            .mount(&server)
            .await;

        let client = AccountingClient::new(test_config(&server.uri()));
        let organisation = client.get_organisation("access-123", "t-1").await.unwrap();

        assert!(organisation.is_none());
    }
}
