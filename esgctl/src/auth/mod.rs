//! Authentication and authorization.
//!
//! Two ways into the system, both carrying the same session JWT:
//!
//! - **Session cookie**: set at login/registration, HTTP-only, used by the
//!   dashboard frontend.
//! - **Bearer token**: `Authorization: Bearer <jwt>` for API clients and the
//!   OAuth bridge, which requires a bearer identity for both of its actions.
//!
//! Authorization is deliberately simple: every mutable entity is scoped to
//! its owning user, and a single `is_admin` flag gates the management
//! surface. There is no role or group system.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for the authenticated user in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`session`]: JWT session token creation and verification

pub mod current_user;
pub mod password;
pub mod session;
