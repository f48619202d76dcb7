//! Extractor for the authenticated user.
//!
//! Authentication is attempted from two places, in order:
//!
//! 1. `Authorization: Bearer <token>` header carrying a session JWT
//! 2. The session cookie set at login
//!
//! Both carry the same JWT, so browser clients and API clients share one
//! session mechanism. A request with no valid credentials is rejected with
//! 401 before the handler runs.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, trace};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};

/// Extract user from a bearer token in the Authorization header
/// Returns:
/// - None: No Authorization header or not a Bearer token
/// - Some(Ok(user)): Valid session JWT found and verified
/// - Some(Err(error)): Bearer token present but invalid/expired
fn try_bearer_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }));
        }
    };

    let token = auth_str.strip_prefix("Bearer ")?;

    Some(session::verify_session_token(token, config))
}

/// Extract user from the session cookie if present and valid
/// Returns:
/// - None: No session cookie present (or only invalid/expired ones)
/// - Some(Ok(user)): Valid session cookie found and verified
/// - Some(Err(error)): Cookie header present but unreadable
fn try_session_cookie_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }));
        }
    };
    let cookie_name = &config.auth.native.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                match session::verify_session_token(value, config) {
                    Ok(user) => return Some(Ok(user)),
                    Err(_) => {
                        // Invalid/expired token; expected for stale cookies, keep looking
                        continue;
                    }
                }
            }
        }
    }
    None
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        // Bearer token first (most specific), then the session cookie.
        match try_bearer_auth(parts, &state.config) {
            Some(Ok(user)) => {
                debug!("Found bearer-authenticated user: {}", user.id);
                return Ok(user);
            }
            Some(Err(e)) => {
                trace!("Bearer authentication failed: {:?}", e);
            }
            None => {
                trace!("No bearer authentication attempted");
            }
        }

        if state.config.auth.native.enabled {
            match try_session_cookie_auth(parts, &state.config) {
                Some(Ok(user)) => {
                    debug!("Found session-cookie authenticated user: {}", user.id);
                    return Ok(user);
                }
                Some(Err(e)) => {
                    trace!("Session cookie authentication failed: {:?}", e);
                }
                None => {
                    trace!("No session cookie authentication attempted");
                }
            }
        }

        Err(Error::Unauthenticated { message: None })
    }
}

/// Reject non-admin users
pub fn require_admin(user: &CurrentUser) -> Result<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions {
            resource: "admin resource".to_string(),
        })
    }
}
