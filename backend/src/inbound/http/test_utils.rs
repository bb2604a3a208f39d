//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;

use crate::domain::ports::{MockAdminRegistrationsQuery, MockAdminSessions, MockRegistrationCommand};
use crate::inbound::http::state::HttpState;

/// Name of the session cookie used by the application.
pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and the `Secure` flag off, so
/// plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler state backed by the given port mocks.
pub fn mock_state(
    registrations: MockRegistrationCommand,
    admin_query: MockAdminRegistrationsQuery,
    admin_sessions: MockAdminSessions,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(registrations),
        Arc::new(admin_query),
        Arc::new(admin_sessions),
    ))
}
