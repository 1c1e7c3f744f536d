//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! response DTOs and the domain error wrappers, plus the `Token`
//! authorisation scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::dto::{
    ComplaintResponse, ComplaintTypeCountResponse, LoginRequest, LoginResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the token security scheme referenced by protected routes.
pub const TOKEN_SECURITY_SCHEME: &str = "token";

/// Adds the `Authorization: Token <key>` scheme to the document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <key>` where the key comes from POST /login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Complaint lookup API",
        description = "Token-authenticated access to council district complaint records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("token" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::complaints::all_complaints,
        crate::inbound::http::complaints::open_cases,
        crate::inbound::http::complaints::closed_cases,
        crate::inbound::http::complaints::top_complaints,
        crate::inbound::http::complaints::constituent_complaints,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ComplaintResponse,
        ComplaintTypeCountResponse,
        LoginRequest,
        LoginResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "complaints", description = "District-scoped complaint lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
