//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdminRegistrationsQuery, AdminSessions, RegistrationCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registrations: Arc<dyn RegistrationCommand>,
    pub admin_query: Arc<dyn AdminRegistrationsQuery>,
    pub admin_sessions: Arc<dyn AdminSessions>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use contest_backend::domain::ports::{
    ///     AdminRegistrationsQuery, AdminSessions, RegistrationCommand,
    /// };
    /// use contest_backend::inbound::http::state::HttpState;
    ///
    /// fn build(
    ///     registrations: Arc<dyn RegistrationCommand>,
    ///     admin_query: Arc<dyn AdminRegistrationsQuery>,
    ///     admin_sessions: Arc<dyn AdminSessions>,
    /// ) -> HttpState {
    ///     HttpState::new(registrations, admin_query, admin_sessions)
    /// }
    /// ```
    pub fn new(
        registrations: Arc<dyn RegistrationCommand>,
        admin_query: Arc<dyn AdminRegistrationsQuery>,
        admin_sessions: Arc<dyn AdminSessions>,
    ) -> Self {
        Self {
            registrations,
            admin_query,
            admin_sessions,
        }
    }
}
