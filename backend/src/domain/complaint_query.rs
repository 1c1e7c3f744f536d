//! Complaint query service.
//!
//! Implements [`ComplaintsQuery`] on top of the complaint and profile
//! repositories. Stores only filter and group; ordering and truncation happen
//! here so every adapter returns identical results.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::ports::{
    ComplaintRepository, ComplaintRepositoryError, ComplaintsQuery, UserProfileRepository,
    UserProfileRepositoryError,
};
use super::{
    AccessScopeResolver, CaseState, Complaint, ComplaintTypeCount, ConstituentFlag,
    DistrictValidationError, Error, UserId,
};

/// Number of entries returned by [`ComplaintsQuery::top_types`].
pub const TOP_COMPLAINT_TYPES_LIMIT: usize = 3;

/// Failures raised while answering a complaint query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplaintQueryError {
    /// The caller's profile holds a district that is not an integer.
    #[error(transparent)]
    InvalidDistrict(#[from] DistrictValidationError),
    /// The authenticated user has no profile.
    #[error("no profile is linked to user {user_id}")]
    ProfileNotFound {
        /// User whose profile was missing.
        user_id: UserId,
    },
    /// Any other failure reading profiles or complaints.
    #[error("complaint store failure: {message}")]
    StoreFailure {
        /// Underlying failure description.
        message: String,
    },
}

impl From<UserProfileRepositoryError> for ComplaintQueryError {
    fn from(value: UserProfileRepositoryError) -> Self {
        Self::StoreFailure {
            message: value.to_string(),
        }
    }
}

impl From<ComplaintRepositoryError> for ComplaintQueryError {
    fn from(value: ComplaintRepositoryError) -> Self {
        Self::StoreFailure {
            message: value.to_string(),
        }
    }
}

impl From<ComplaintQueryError> for Error {
    fn from(value: ComplaintQueryError) -> Self {
        match value {
            ComplaintQueryError::ProfileNotFound { .. } => {
                Error::not_found("user profile not found")
            }
            ComplaintQueryError::InvalidDistrict(err) => {
                Error::internal(format!("invalid district on profile: {err}"))
            }
            ComplaintQueryError::StoreFailure { message } => Error::internal(message),
        }
    }
}

/// Service answering scoped complaint queries.
pub struct ComplaintQueryService<C, P> {
    complaints: Arc<C>,
    scopes: AccessScopeResolver<P>,
}

impl<C, P> Clone for ComplaintQueryService<C, P> {
    fn clone(&self) -> Self {
        Self {
            complaints: Arc::clone(&self.complaints),
            scopes: self.scopes.clone(),
        }
    }
}

impl<C, P> ComplaintQueryService<C, P> {
    /// Create a new service with the given repositories.
    pub fn new(complaints: Arc<C>, profiles: Arc<P>) -> Self {
        Self {
            complaints,
            scopes: AccessScopeResolver::new(profiles),
        }
    }
}

impl<C, P> ComplaintQueryService<C, P>
where
    C: ComplaintRepository,
    P: UserProfileRepository,
{
    async fn scoped(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
        state: CaseState,
    ) -> Result<Vec<Complaint>, ComplaintQueryError> {
        let scope = self.scopes.resolve(user_id, constituent).await?;
        let complaints = self.complaints.find_matching(&scope, state).await?;
        debug!(
            user_id = %user_id,
            ?state,
            matched = complaints.len(),
            "complaint query evaluated"
        );
        Ok(complaints)
    }

    async fn top(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<ComplaintTypeCount>, ComplaintQueryError> {
        let scope = self.scopes.resolve(user_id, constituent).await?;
        let counts = self.complaints.count_types(&scope).await?;
        Ok(rank_complaint_types(counts, TOP_COMPLAINT_TYPES_LIMIT))
    }
}

/// Most recently opened first; complaints without an open date sort last.
fn newest_first(a: &Complaint, b: &Complaint) -> Ordering {
    b.opendate().cmp(&a.opendate())
}

/// Sort by count descending, then type name ascending, keeping `limit` entries.
pub fn rank_complaint_types(
    mut counts: Vec<ComplaintTypeCount>,
    limit: usize,
) -> Vec<ComplaintTypeCount> {
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.complaint_type.cmp(&b.complaint_type))
    });
    counts.truncate(limit);
    counts
}

fn into_domain_error(err: ComplaintQueryError) -> Error {
    if !matches!(err, ComplaintQueryError::ProfileNotFound { .. }) {
        error!(error = %err, "complaint query failed");
    }
    Error::from(err)
}

#[async_trait]
impl<C, P> ComplaintsQuery for ComplaintQueryService<C, P>
where
    C: ComplaintRepository,
    P: UserProfileRepository,
{
    async fn list_all(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<Complaint>, Error> {
        let mut complaints = self
            .scoped(user_id, constituent, CaseState::All)
            .await
            .map_err(into_domain_error)?;
        if constituent.is_set() {
            complaints.sort_by(newest_first);
        }
        Ok(complaints)
    }

    async fn list_open(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<Complaint>, Error> {
        self.scoped(user_id, constituent, CaseState::Open)
            .await
            .map_err(into_domain_error)
    }

    async fn list_closed(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<Complaint>, Error> {
        self.scoped(user_id, constituent, CaseState::Closed)
            .await
            .map_err(into_domain_error)
    }

    async fn top_types(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<ComplaintTypeCount>, Error> {
        self.top(user_id, constituent).await.map_err(into_domain_error)
    }
}

#[cfg(test)]
#[path = "complaint_query_tests.rs"]
mod tests;
