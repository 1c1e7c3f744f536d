//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, auth_tokens, complaints, user_profiles};

/// Row struct for reading from the complaints table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub unique_key: String,
    pub account: String,
    pub council_dist: Option<String>,
    pub opendate: Option<NaiveDate>,
    pub closedate: Option<NaiveDate>,
    pub complaint_type: String,
    pub descriptor: String,
    pub borough: String,
}

/// Row struct for reading from the user_profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub district: String,
    pub borough: String,
}

/// Credential columns of the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountCredentialsRow {
    pub user_id: Uuid,
    pub password_hash: String,
}

/// Insertable struct for issuing tokens.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = auth_tokens)]
pub(crate) struct NewAuthTokenRow<'a> {
    pub key: &'a str,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
