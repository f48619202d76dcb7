//! HTTP request handlers for all API endpoints.
//!
//! This module contains Axum route handlers organized by resource type.
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Authentication and authorization checks
//! - Business logic execution via database repositories
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`auth`]: Authentication, login, registration, and password management
//! - [`config`]: Frontend configuration retrieval
//! - [`directory`]: Marketplace and funding directory listings
//! - [`emails`]: Welcome email sending
//! - [`emissions`]: Per-category emission record fetch and replacement
//! - [`integrations`]: Accounting provider OAuth bridge
//! - [`locations`]: Office location CRUD with lazy default creation
//! - [`profiles`]: Company profile fetch and upsert
//! - [`static_assets`]: Frontend asset serving and SPA routing
//! - [`users`]: User listing (admin) and current-user lookup

pub mod auth;
pub mod config;
pub mod directory;
pub mod emails;
pub mod emissions;
pub mod integrations;
pub mod locations;
pub mod profiles;
pub mod static_assets;
pub mod users;
