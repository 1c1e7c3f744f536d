//! Response bodies for the complaint and login endpoints.
//!
//! Complaints are projected field for field with snake_case keys. Dates
//! serialise as `YYYY-MM-DD` and absent dates as `null`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthToken, Complaint, ComplaintTypeCount};

/// Public projection of a complaint record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponse {
    /// City-wide complaint identifier.
    #[schema(example = "20240101-0001")]
    pub unique_key: String,
    /// Filing district code.
    #[schema(example = "NYCC01")]
    pub account: String,
    /// Resident district code, when recorded.
    #[schema(example = "NYCC01")]
    pub council_dist: Option<String>,
    /// Day the case was opened.
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-01")]
    pub opendate: Option<NaiveDate>,
    /// Day the case was closed.
    #[schema(value_type = Option<String>, format = Date)]
    pub closedate: Option<NaiveDate>,
    /// Complaint category.
    #[schema(example = "Noise")]
    pub complaint_type: String,
    /// Subcategory text.
    #[schema(example = "Loud Music")]
    pub descriptor: String,
    /// Borough the complaint concerns.
    #[schema(example = "Manhattan")]
    pub borough: String,
}

impl From<&Complaint> for ComplaintResponse {
    fn from(value: &Complaint) -> Self {
        Self {
            unique_key: value.unique_key().to_owned(),
            account: value.account().to_owned(),
            council_dist: value.council_dist().map(str::to_owned),
            opendate: value.opendate(),
            closedate: value.closedate(),
            complaint_type: value.complaint_type().to_owned(),
            descriptor: value.descriptor().to_owned(),
            borough: value.borough().to_owned(),
        }
    }
}

/// Project a result set, preserving its order.
#[must_use]
pub fn project_complaints(complaints: &[Complaint]) -> Vec<ComplaintResponse> {
    complaints.iter().map(ComplaintResponse::from).collect()
}

/// One entry of the top complaint types ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintTypeCountResponse {
    /// Complaint category.
    #[schema(example = "Noise")]
    pub complaint_type: String,
    /// Complaints of that category in scope.
    #[schema(example = 3)]
    pub count: u64,
}

impl From<ComplaintTypeCount> for ComplaintTypeCountResponse {
    fn from(value: ComplaintTypeCount) -> Self {
        Self {
            complaint_type: value.complaint_type,
            count: value.count,
        }
    }
}

/// Login request body for `POST /login/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Account name.
    #[schema(example = "jdoe")]
    pub username: String,
    /// Account password.
    #[schema(example = "doe-1")]
    pub password: String,
}

/// Successful login body carrying the caller's API token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Token to send as `Authorization: Token <token>`.
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

impl From<AuthToken> for LoginResponse {
    fn from(value: AuthToken) -> Self {
        Self {
            token: value.into(),
        }
    }
}
