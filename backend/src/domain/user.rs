//! Authenticated users and their council-office profiles.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RawDistrict;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The id was blank.
    EmptyId,
    /// The id is not a UUID.
    InvalidId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Council-office profile attached one-to-one to a user.
///
/// The district is kept raw; [`super::DistrictCode::format`] turns it into
/// the code complaints are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    user_id: UserId,
    full_name: String,
    district: RawDistrict,
    borough: String,
}

impl UserProfile {
    /// Build a profile for `user_id`.
    pub fn new(
        user_id: UserId,
        full_name: impl Into<String>,
        district: impl Into<RawDistrict>,
        borough: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
            district: district.into(),
            borough: borough.into(),
        }
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Display name of the staff member.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// District as provisioned, before formatting.
    #[must_use]
    pub const fn district(&self) -> &RawDistrict {
        &self.district
    }

    /// Borough the staff member serves.
    #[must_use]
    pub fn borough(&self) -> &str {
        self.borough.as_str()
    }
}
