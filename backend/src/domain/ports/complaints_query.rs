//! Driving port for complaint lookups.
//!
//! HTTP handlers call this port with the authenticated user and the
//! constituent flag from the request; the implementation resolves the
//! caller's district and returns the matching records.

use async_trait::async_trait;

use crate::domain::{Complaint, ComplaintTypeCount, ConstituentFlag, Error, UserId};

/// Domain use-case port for reading complaints scoped to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintsQuery: Send + Sync {
    /// Every complaint in the caller's scope.
    async fn list_all(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<Complaint>, Error>;

    /// Open complaints in the caller's scope.
    async fn list_open(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<Complaint>, Error>;

    /// Closed complaints in the caller's scope.
    async fn list_closed(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<Complaint>, Error>;

    /// Most frequent complaint types in the caller's scope.
    async fn top_types(
        &self,
        user_id: &UserId,
        constituent: ConstituentFlag,
    ) -> Result<Vec<ComplaintTypeCount>, Error>;
}
