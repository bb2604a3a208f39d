//! Contest registration backend.
//!
//! Layout follows a hexagonal split:
//! - [`domain`]: registration entities, validation and use-case services;
//! - [`inbound`]: actix-web handlers translating HTTP into driving ports;
//! - [`outbound`]: PostgreSQL, in-memory and credential adapters;
//! - [`admin_seed`]: startup creation of the administrator account.

pub mod admin_seed;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
