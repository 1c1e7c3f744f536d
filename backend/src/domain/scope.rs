//! Access scopes: which complaints a caller may see.
//!
//! Staff see complaints filed by their own council office (`account`), or,
//! with the constituent flag set, complaints from residents of their district
//! (`council_dist`). Either way the comparison value is the caller's
//! formatted [`DistrictCode`].

use std::sync::Arc;

use tracing::debug;

use super::ports::UserProfileRepository;
use super::{Complaint, ComplaintQueryError, DistrictCode, UserId};

/// Complaint field a scope compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeField {
    /// District of the filing office.
    Account,
    /// District the complainant lives in.
    CouncilDist,
}

/// Equality filter restricting complaints to one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    field: ScopeField,
    equals: DistrictCode,
}

impl ScopeFilter {
    /// Restrict `field` to complaints carrying `equals`.
    #[must_use]
    pub const fn new(field: ScopeField, equals: DistrictCode) -> Self {
        Self { field, equals }
    }

    /// Complaint field the filter compares.
    #[must_use]
    pub const fn field(&self) -> ScopeField {
        self.field
    }

    /// District code the scoped field must equal.
    #[must_use]
    pub const fn equals(&self) -> &DistrictCode {
        &self.equals
    }

    /// Whether `complaint` falls inside this scope.
    ///
    /// A complaint without a recorded resident district never matches a
    /// [`ScopeField::CouncilDist`] scope.
    #[must_use]
    pub fn matches(&self, complaint: &Complaint) -> bool {
        let value = match self.field {
            ScopeField::Account => Some(complaint.account()),
            ScopeField::CouncilDist => complaint.council_dist(),
        };
        value == Some(self.equals.as_str())
    }
}

/// Request-level switch between filing-office and resident scopes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConstituentFlag(bool);

impl ConstituentFlag {
    /// Filing-office scope.
    pub const OFF: Self = Self(false);
    /// Resident scope.
    pub const ON: Self = Self(true);

    /// Interpret a raw query value; only `"true"` in any letter case enables it.
    ///
    /// # Examples
    /// ```
    /// use complaint_backend::domain::ConstituentFlag;
    ///
    /// assert!(ConstituentFlag::from_query(Some("TRUE")).is_set());
    /// assert!(!ConstituentFlag::from_query(Some("1")).is_set());
    /// assert!(!ConstituentFlag::from_query(None).is_set());
    /// ```
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        Self(raw.is_some_and(|value| value.eq_ignore_ascii_case("true")))
    }

    /// Whether the resident scope was requested.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0
    }

    /// Complaint field this flag selects.
    #[must_use]
    pub const fn field(self) -> ScopeField {
        if self.0 {
            ScopeField::CouncilDist
        } else {
            ScopeField::Account
        }
    }
}

impl From<bool> for ConstituentFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

/// Resolves the scope filter for an authenticated user.
pub struct AccessScopeResolver<P> {
    profiles: Arc<P>,
}

impl<P> Clone for AccessScopeResolver<P> {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
        }
    }
}

impl<P> AccessScopeResolver<P> {
    /// Resolve scopes against `profiles`.
    pub const fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

impl<P> AccessScopeResolver<P>
where
    P: UserProfileRepository,
{
    /// Load the caller's profile and build the filter for `constituent`.
    pub async fn resolve(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<ScopeFilter, ComplaintQueryError> {
        let profile = self
            .profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ComplaintQueryError::ProfileNotFound {
                user_id: user_id.clone(),
            })?;
        let district = DistrictCode::format(profile.district())?;
        debug!(
            user_id = %user_id,
            district = %district,
            constituent = constituent.is_set(),
            "resolved complaint scope"
        );
        Ok(ScopeFilter::new(constituent.field(), district))
    }
}
