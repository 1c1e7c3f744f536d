//! Complaint lookup handlers.
//!
//! ```text
//! GET /api/complaints/allComplaints/?constituent=true
//! GET /api/complaints/openCases/
//! GET /api/complaints/closedCases/
//! GET /api/complaints/topComplaints/
//! GET /api/complaints/constituentComplaints/
//! ```
//!
//! Every route requires `Authorization: Token <key>`. Without
//! `constituent=true` results are scoped to complaints filed by the caller's
//! district office; with it, to complaints from residents of that district.

use std::fmt;

use actix_web::{get, web};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

use crate::domain::ConstituentFlag;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::{
    ComplaintResponse, ComplaintTypeCountResponse, project_complaints,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Path prefix shared by every complaint route.
pub const COMPLAINTS_SCOPE: &str = "/api/complaints";

/// Optional scope switch accepted by every complaint route.
///
/// When `constituent` is repeated the last occurrence wins. Unrelated
/// parameters are ignored.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConstituentQuery {
    /// `true` (any case) scopes results to the caller's resident district.
    #[param(example = "true")]
    pub constituent: Option<String>,
}

impl<'de> Deserialize<'de> for ConstituentQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConstituentQueryVisitor)
    }
}

struct ConstituentQueryVisitor;

impl<'de> Visitor<'de> for ConstituentQueryVisitor {
    type Value = ConstituentQuery;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("query parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut constituent = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "constituent" {
                constituent = Some(map.next_value::<String>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(ConstituentQuery { constituent })
    }
}

impl ConstituentQuery {
    fn flag(&self) -> ConstituentFlag {
        ConstituentFlag::from_query(self.constituent.as_deref())
    }
}

/// List every complaint in the caller's scope.
///
/// Resident-scoped results are ordered by open date, newest first, with
/// undated complaints last.
#[utoipa::path(
    get,
    path = "/api/complaints/allComplaints/",
    params(ConstituentQuery),
    responses(
        (status = 200, description = "Complaints in scope", body = [ComplaintResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Caller has no profile", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "allComplaints",
    security(("token" = []))
)]
#[get("/allComplaints/")]
pub async fn all_complaints(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<ConstituentQuery>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let complaints = state
        .complaints
        .list_all(user.user_id(), query.flag())
        .await?;
    Ok(web::Json(project_complaints(&complaints)))
}

/// List open complaints: opened and not yet closed.
#[utoipa::path(
    get,
    path = "/api/complaints/openCases/",
    params(ConstituentQuery),
    responses(
        (status = 200, description = "Open complaints in scope", body = [ComplaintResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Caller has no profile", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "openCases",
    security(("token" = []))
)]
#[get("/openCases/")]
pub async fn open_cases(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<ConstituentQuery>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let complaints = state
        .complaints
        .list_open(user.user_id(), query.flag())
        .await?;
    Ok(web::Json(project_complaints(&complaints)))
}

/// List closed complaints, whether or not an open date was recorded.
#[utoipa::path(
    get,
    path = "/api/complaints/closedCases/",
    params(ConstituentQuery),
    responses(
        (status = 200, description = "Closed complaints in scope", body = [ComplaintResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Caller has no profile", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "closedCases",
    security(("token" = []))
)]
#[get("/closedCases/")]
pub async fn closed_cases(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<ConstituentQuery>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let complaints = state
        .complaints
        .list_closed(user.user_id(), query.flag())
        .await?;
    Ok(web::Json(project_complaints(&complaints)))
}

/// The three most frequent complaint types in scope.
#[utoipa::path(
    get,
    path = "/api/complaints/topComplaints/",
    params(ConstituentQuery),
    responses(
        (status = 200, description = "Most frequent complaint types", body = [ComplaintTypeCountResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Caller has no profile", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "topComplaints",
    security(("token" = []))
)]
#[get("/topComplaints/")]
pub async fn top_complaints(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<ConstituentQuery>,
) -> ApiResult<web::Json<Vec<ComplaintTypeCountResponse>>> {
    let counts = state
        .complaints
        .top_types(user.user_id(), query.flag())
        .await?;
    Ok(web::Json(
        counts
            .into_iter()
            .map(ComplaintTypeCountResponse::from)
            .collect(),
    ))
}

/// Complaints from residents of the caller's district, newest first.
///
/// Equivalent to `allComplaints/?constituent=true`.
#[utoipa::path(
    get,
    path = "/api/complaints/constituentComplaints/",
    responses(
        (status = 200, description = "Resident complaints", body = [ComplaintResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Caller has no profile", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "constituentComplaints",
    security(("token" = []))
)]
#[get("/constituentComplaints/")]
pub async fn constituent_complaints(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ComplaintResponse>>> {
    let complaints = state
        .complaints
        .list_all(user.user_id(), ConstituentFlag::ON)
        .await?;
    Ok(web::Json(project_complaints(&complaints)))
}

/// Register every complaint route under [`COMPLAINTS_SCOPE`].
pub fn complaint_routes() -> actix_web::Scope {
    web::scope(COMPLAINTS_SCOPE)
        .service(all_complaints)
        .service(open_cases)
        .service(closed_cases)
        .service(top_complaints)
        .service(constituent_complaints)
}

#[cfg(test)]
#[path = "complaints_tests.rs"]
mod tests;
