//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed registration entities and the use-cases
//! that operate on them, independent of HTTP and persistence. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - RegistrationSubmission / Registration: raw and normalized entries.
//! - Account: persisted registration record, without its password hash.
//! - RegistrationService, AdminQueryService, AdminSessionService: use-cases.

pub mod account;
pub mod admin_query_service;
pub mod admin_session;
pub mod admin_session_service;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod stats;
pub mod trace_id;

pub use self::account::{
    Account, AccountCredentials, AccountId, ContactEmail, ContactEmailError, NewAccount,
    PasswordHash, Role, UnknownRole,
};
pub use self::admin_query_service::{AdminAccessError, AdminQueryService};
pub use self::admin_session::{AdminSession, AdminSessionToken};
pub use self::admin_session_service::{AdminSessionService, DEFAULT_ADMIN_SESSION_TTL_MINUTES};
pub use self::credentials::{AdminCredentials, CredentialsValidationError, GeneratedPassword};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::registration::{
    AcademicLevel, DEFAULT_OTHER_NOTES, Field, FieldError, FieldRule, INSTITUTION_OPTIONS,
    Member, MemberField, MemberSubmission, OTHER_INSTITUTION, Project, ProjectField,
    ProjectSubmission, Registration, RegistrationKind, RegistrationSubmission,
    UnknownRegistrationKind, ValidationReport, validate_submission,
};
pub use self::registration_service::{MIN_GROUP_MEMBERS, RegistrationError, RegistrationService};
pub use self::stats::RegistrationStats;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use contest_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
