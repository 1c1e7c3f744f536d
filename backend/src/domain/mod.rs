//! Domain primitives, services and ports.
//!
//! Purpose: define the complaint lookup model independently of transport and
//! storage. Types are immutable once built and document their invariants in
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - DistrictCode / RawDistrict: canonical `NYCC` district codes.
//! - Complaint / CaseState / ComplaintTypeCount: complaint records.
//! - ScopeFilter / ConstituentFlag / AccessScopeResolver: access scopes.
//! - ComplaintQueryService: implements the `ComplaintsQuery` driving port.
//! - TokenLoginService: implements `LoginService` and `TokenAuthenticator`.

pub mod auth;
pub mod complaint;
pub mod complaint_query;
pub mod dev_fixtures;
pub mod district;
pub mod error;
pub mod login;
pub mod password;
pub mod ports;
pub mod scope;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthToken, AuthTokenValidationError, LoginCredentials, LoginValidationError};
pub use self::complaint::{CaseState, Complaint, ComplaintDraft, ComplaintTypeCount};
pub use self::complaint_query::{
    ComplaintQueryError, ComplaintQueryService, TOP_COMPLAINT_TYPES_LIMIT, rank_complaint_types,
};
pub use self::district::{
    DISTRICT_CODE_PREFIX, DistrictCode, DistrictValidationError, RawDistrict, format_district,
};
pub use self::error::{DomainError as Error, ErrorCode, ErrorValidationError};
pub use self::login::{INVALID_CREDENTIALS_MESSAGE, TokenLoginService};
pub use self::password::{PasswordHashError, hash_password, verify_password};
pub use self::scope::{AccessScopeResolver, ConstituentFlag, ScopeField, ScopeFilter};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserProfile, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use complaint_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
