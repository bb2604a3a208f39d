//! Admin API handlers.
//!
//! ```text
//! GET    /api/groups?email=..&password=..     one-shot credential check
//! POST   /api/v1/admin/session                {"email":"..","password":".."}
//! DELETE /api/v1/admin/session
//! GET    /api/v1/admin/registrations
//! GET    /api/v1/admin/stats
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Account, AdminCredentials, CredentialsValidationError, Error, ErrorCode, RegistrationStats,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::registrations_dto::{MemberView, ProjectPayload};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for the legacy listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct CredentialsQuery {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Admin login body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AdminLoginRequest {
    #[schema(example = "admin@mbaya.ga")]
    pub email: String,
    pub password: String,
}

/// Issued admin session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSessionResponse {
    pub expires_at: DateTime<Utc>,
}

/// A registration account without its password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    /// Group name, or "first last" for solo entries.
    pub name: String,
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    #[schema(example = "groupe")]
    pub registration_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    pub project: ProjectPayload,
    pub members: Vec<MemberView>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(value: Account) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.display_name,
            email: value.email.to_string(),
            role: value.role.to_string(),
            registration_type: value.kind.to_string(),
            group_name: value.group_name,
            project: value.project.into(),
            members: value.members.into_iter().map(MemberView::from).collect(),
            created_at: value.created_at,
        }
    }
}

/// Aggregate counts over participant accounts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_registrations: usize,
    pub solo_registrations: usize,
    pub group_registrations: usize,
    pub total_participants: usize,
}

impl From<RegistrationStats> for StatsResponse {
    fn from(value: RegistrationStats) -> Self {
        Self {
            total_registrations: value.total_registrations,
            solo_registrations: value.solo_registrations,
            group_registrations: value.group_registrations,
            total_participants: value.total_participants,
        }
    }
}

fn parse_credentials(email: &str, password: &str) -> Result<AdminCredentials, Error> {
    AdminCredentials::try_from_parts(email, password)
        .map_err(|err: CredentialsValidationError| Error::invalid_request(err.to_string()))
}

fn account_list(accounts: Vec<Account>) -> web::Json<Vec<AccountResponse>> {
    web::Json(accounts.into_iter().map(AccountResponse::from).collect())
}

/// Drop the cookie when the server no longer honours its token.
fn forget_rejected_session(session: &SessionContext, error: Error) -> Error {
    if error.code() == ErrorCode::Unauthorized {
        session.clear();
    }
    error
}

/// List every registration after a one-shot admin credential check.
#[utoipa::path(
    get,
    path = "/api/groups",
    params(CredentialsQuery),
    responses(
        (status = 200, description = "All registrations", body = [AccountResponse]),
        (status = 400, description = "Email and password required", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listGroups",
    security([])
)]
#[get("/groups")]
pub async fn list_groups(
    state: web::Data<HttpState>,
    query: web::Query<CredentialsQuery>,
) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let CredentialsQuery { email, password } = query.into_inner();
    let credentials = parse_credentials(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )?;
    let accounts = state.admin_query.list_registrations(&credentials).await?;
    Ok(account_list(accounts))
}

/// Exchange admin credentials for a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/admin/session",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Session opened", body = AdminSessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Email and password required", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "openAdminSession",
    security([])
)]
#[post("/admin/session")]
pub async fn open_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<web::Json<AdminSessionResponse>> {
    let credentials = parse_credentials(&payload.email, &payload.password)?;
    let issued = state.admin_sessions.open(&credentials).await?;
    session.persist_admin_token(&issued.token)?;
    Ok(web::Json(AdminSessionResponse {
        expires_at: issued.expires_at,
    }))
}

/// Revoke the current admin session.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/session",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "closeAdminSession"
)]
#[delete("/admin/session")]
pub async fn close_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(token) = session.admin_token()? {
        state.admin_sessions.close(&token).await?;
    }
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// List every registration for the session's admin.
#[utoipa::path(
    get,
    path = "/api/v1/admin/registrations",
    responses(
        (status = 200, description = "All registrations", body = [AccountResponse]),
        (status = 401, description = "Missing or expired session", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminRegistrations"
)]
#[get("/admin/registrations")]
pub async fn admin_registrations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let token = session.require_admin_token()?;
    let accounts = state
        .admin_sessions
        .registrations(&token)
        .await
        .map_err(|error| forget_rejected_session(&session, error))?;
    Ok(account_list(accounts))
}

/// Registration totals for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Registration statistics", body = StatsResponse),
        (status = 401, description = "Missing or expired session", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminStats"
)]
#[get("/admin/stats")]
pub async fn admin_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsResponse>> {
    let token = session.require_admin_token()?;
    let stats = state
        .admin_sessions
        .stats(&token)
        .await
        .map_err(|error| forget_rejected_session(&session, error))?;
    Ok(web::Json(stats.into()))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
