//! Registration API handlers.
//!
//! ```text
//! POST /api/register                      {"type":"solo","project":{...},"members":[...]}
//! POST /api/v1/registrations              (same body)
//! POST /api/v1/registrations/validate     (same body, never persists)
//! GET  /api/v1/registrations/options
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::{
    AcademicLevel, Error, INSTITUTION_OPTIONS, OTHER_INSTITUTION, RegistrationKind,
    RegistrationSubmission, ValidationReport, validate_submission,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::registrations_dto::{
    RegistrationOptionsResponse, RegistrationRequest, RegistrationResponse, ValidationResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful";

fn invalid_submission(report: ValidationReport) -> Error {
    debug!(errors = report.error_count(), "registration failed validation");
    Error::invalid_request("Invalid registration").with_details(report.to_details())
}

async fn create(state: &HttpState, payload: RegistrationRequest) -> ApiResult<HttpResponse> {
    let submission = RegistrationSubmission::try_from(payload)?;
    let registration = submission.normalize().map_err(invalid_submission)?;
    let receipt = state.registrations.register(registration).await?;
    Ok(HttpResponse::Created().json(RegistrationResponse {
        message: REGISTRATION_SUCCESS_MESSAGE.to_owned(),
        role: receipt.role.to_string(),
        generated_password: receipt.password.expose().to_owned(),
    }))
}

/// Submit a solo or group registration.
///
/// The response carries the generated password; it is never shown again.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 400, description = "Invalid fields or group size", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    create(&state, payload.into_inner()).await
}

/// Versioned alias of `POST /api/register`.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = RegistrationResponse),
        (status = 400, description = "Invalid fields or group size", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "createRegistration",
    security([])
)]
#[post("/registrations")]
pub async fn create_registration(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    create(&state, payload.into_inner()).await
}

/// Check a submission without storing it.
#[utoipa::path(
    post,
    path = "/api/v1/registrations/validate",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Validation verdict", body = ValidationResponse),
        (status = 400, description = "Unknown registration type", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "validateRegistration",
    security([])
)]
#[post("/registrations/validate")]
pub async fn validate_registration(
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<web::Json<ValidationResponse>> {
    let submission = RegistrationSubmission::try_from(payload.into_inner())?;
    let report = validate_submission(&submission);
    Ok(web::Json(ValidationResponse {
        valid: report.is_valid(),
        errors: report.to_details(),
    }))
}

/// Institution, level and type choices for the form.
#[utoipa::path(
    get,
    path = "/api/v1/registrations/options",
    responses(
        (status = 200, description = "Form options", body = RegistrationOptionsResponse)
    ),
    tags = ["registrations"],
    operation_id = "registrationOptions",
    security([])
)]
#[get("/registrations/options")]
pub async fn registration_options() -> web::Json<RegistrationOptionsResponse> {
    web::Json(RegistrationOptionsResponse {
        registration_types: [RegistrationKind::Solo, RegistrationKind::Group]
            .iter()
            .map(ToString::to_string)
            .collect(),
        institutions: INSTITUTION_OPTIONS.iter().map(|&name| name.to_owned()).collect(),
        other_institution: OTHER_INSTITUTION.to_owned(),
        levels: AcademicLevel::ALL
            .iter()
            .map(|level| level.as_str().to_owned())
            .collect(),
    })
}

#[cfg(test)]
#[path = "registrations_tests.rs"]
mod tests;
