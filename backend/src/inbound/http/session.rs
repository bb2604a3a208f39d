//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only ever carries the opaque admin session token; the session
//! itself (expiry, revocation) lives server-side behind the
//! [`AdminSessions`](crate::domain::ports::AdminSessions) port.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AdminAccessError, AdminSessionToken, Error};

pub(crate) const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Newtype wrapper that exposes admin-session cookie operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the admin token in the encrypted session cookie.
    pub fn persist_admin_token(&self, token: &AdminSessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ADMIN_TOKEN_KEY, token.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token carried by the cookie, if any and well formed.
    pub fn admin_token(&self) -> Result<Option<AdminSessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(ADMIN_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match raw.parse() {
            Ok(token) => Some(token),
            Err(error) => {
                warn!(%error, "discarding malformed admin token in session cookie");
                None
            }
        }))
    }

    /// Require an admin token or fail with `401 Unauthorized`.
    pub fn require_admin_token(&self) -> Result<AdminSessionToken, Error> {
        self.admin_token()?
            .ok_or_else(|| AdminAccessError::SessionExpired.into())
    }

    /// Drop the cookie contents.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
