//! OpenAPI documentation configuration.
//!
//! Aggregates every annotated handler into one document served at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers;
use crate::api::models;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::get_registration_info,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::change_password,
        handlers::config::get_config,
        handlers::users::list_users,
        handlers::users::get_me,
        handlers::profiles::get_profile,
        handlers::profiles::upsert_profile,
        handlers::locations::list_locations,
        handlers::locations::create_location,
        handlers::locations::update_location,
        handlers::locations::delete_location,
        handlers::emissions::get_category_records,
        handlers::emissions::save_category_records,
        handlers::directory::list_marketplace,
        handlers::directory::list_funding,
        handlers::integrations::accounting_bridge,
        handlers::integrations::list_connections,
        handlers::emails::send_welcome_email,
    ),
    components(schemas(
        models::auth::RegisterRequest,
        models::auth::LoginRequest,
        models::auth::ChangePasswordRequest,
        models::auth::AuthResponse,
        models::auth::AuthSuccessResponse,
        models::auth::RegistrationInfo,
        models::users::UserResponse,
        models::users::CurrentUser,
        models::profiles::ProfileUpsert,
        models::profiles::ProfileResponse,
        models::locations::LocationCreate,
        models::locations::LocationUpdate,
        models::locations::LocationResponse,
        models::emissions::EmissionCategory,
        models::emissions::EmissionEntry,
        models::emissions::EmissionSave,
        models::emissions::EmissionRecordResponse,
        models::emissions::CategoryRecordsResponse,
        models::integrations::BridgeRequest,
        models::integrations::AuthUrlResponse,
        models::integrations::CallbackResponse,
        models::integrations::ConnectionResponse,
        models::integrations::WelcomeEmailRequest,
        models::integrations::WelcomeEmailResponse,
        handlers::config::FrontendConfig,
        crate::directory::MarketplaceCompany,
        crate::directory::FundingOpportunity,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "authentication", description = "Registration, login, and password management"),
        (name = "users", description = "User account management"),
        (name = "profile", description = "Company profile"),
        (name = "locations", description = "Office locations"),
        (name = "emissions", description = "Emission record collection"),
        (name = "directory", description = "Marketplace and funding directories"),
        (name = "integrations", description = "Accounting provider OAuth bridge"),
        (name = "emails", description = "Transactional email"),
        (name = "config", description = "Frontend configuration"),
    )
)]
pub struct ApiDoc;
