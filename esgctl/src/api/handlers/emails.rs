use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::integrations::{WelcomeEmailRequest, WelcomeEmailResponse},
    api::models::users::CurrentUser,
    email::EmailService,
    errors::{Error, Result},
};

/// Send the welcome email
///
/// Registration triggers the same send in the background; this endpoint lets
/// the dashboard re-send it on demand.
#[utoipa::path(
    post,
    path = "/emails/welcome",
    request_body = WelcomeEmailRequest,
    tag = "emails",
    responses(
        (status = 200, description = "Email sent", body = WelcomeEmailResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Email transport failure"),
    ),
    security(
        ("session_token" = [])
    )
)]
#[tracing::instrument(skip_all, fields(to = %request.email))]
pub async fn send_welcome_email(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(request): Json<WelcomeEmailRequest>,
) -> Result<Json<WelcomeEmailResponse>> {
    if request.email.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Recipient email cannot be empty".to_string(),
        });
    }

    let service = EmailService::new(&state.config)?;
    service
        .send_welcome_email(&request.email, request.name.as_deref(), &request.site_url)
        .await?;

    Ok(Json(WelcomeEmailResponse {
        message: format!("Welcome email sent to {}", request.email),
    }))
}
