//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the domain error schemas from
//! [`crate::inbound::http::schemas`] and the admin session cookie scheme.
//! Swagger UI serves it at `/docs` in debug builds; the `openapi-dump`
//! binary prints it.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AdminSession",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Admin session cookie issued by POST /api/v1/admin/session.",
            ))),
        );
    }
}

/// OpenAPI document for the registration API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contest registration API",
        description = "Participant registration, administrator listing and health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::registrations::register,
        crate::inbound::http::registrations::create_registration,
        crate::inbound::http::registrations::validate_registration,
        crate::inbound::http::registrations::registration_options,
        crate::inbound::http::admin::list_groups,
        crate::inbound::http::admin::open_session,
        crate::inbound::http::admin::close_session,
        crate::inbound::http::admin::admin_registrations,
        crate::inbound::http::admin::admin_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "registrations", description = "Contest registration"),
        (name = "admin", description = "Administrator access to registrations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_is_registered_with_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(error))) = schemas.get(ERROR_SCHEMA_NAME) else {
            panic!("expected Error object schema");
        };

        for field in ["code", "message", "traceId", "details"] {
            assert!(error.properties.contains_key(field), "missing field {field}");
        }
    }

    #[rstest]
    #[case("/api/register")]
    #[case("/api/groups")]
    #[case("/api/v1/registrations")]
    #[case("/api/v1/registrations/validate")]
    #[case("/api/v1/registrations/options")]
    #[case("/api/v1/admin/session")]
    #[case("/api/v1/admin/registrations")]
    #[case("/api/v1/admin/stats")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("AdminSession"));
    }
}
