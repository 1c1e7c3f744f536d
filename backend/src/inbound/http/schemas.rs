//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. These
//! wrappers mirror their shape and are registered with utoipa under the
//! domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation or carries bad credentials.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The API token is missing or unknown.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller may not perform the operation.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The caller has no profile.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected failure; the message is redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "user profile not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}
