//! PostgreSQL-backed `ComplaintRepository` implementation using Diesel ORM.
//!
//! Scope and case-state predicates become `WHERE` clauses and type counts a
//! `GROUP BY`; rows come back in load order (`id`).

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{
    CaseState, Complaint, ComplaintDraft, ComplaintTypeCount, ScopeField, ScopeFilter,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ComplaintRow;
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

/// Diesel-backed implementation of the complaint repository port.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ComplaintRepositoryError {
    map_basic_pool_error(error, |message| ComplaintRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ComplaintRepositoryError {
    map_basic_diesel_error(
        error,
        ComplaintRepositoryError::query,
        ComplaintRepositoryError::connection,
    )
}

fn scoped_query<'a>(scope: &'a ScopeFilter, state: CaseState) -> complaints::BoxedQuery<'a, Pg> {
    let code = scope.equals().as_str();
    let query = complaints::table.into_boxed();
    let query = match scope.field() {
        ScopeField::Account => query.filter(complaints::account.eq(code)),
        ScopeField::CouncilDist => query.filter(complaints::council_dist.eq(code)),
    };
    match state {
        CaseState::All => query,
        CaseState::Open => query.filter(
            complaints::opendate
                .is_not_null()
                .and(complaints::closedate.is_null()),
        ),
        CaseState::Closed => query.filter(complaints::closedate.is_not_null()),
    }
}

fn row_to_complaint(row: ComplaintRow) -> Complaint {
    let ComplaintRow {
        unique_key,
        account,
        council_dist,
        opendate,
        closedate,
        complaint_type,
        descriptor,
        borough,
    } = row;
    Complaint::from(ComplaintDraft {
        unique_key,
        account,
        council_dist,
        opendate,
        closedate,
        complaint_type,
        descriptor,
        borough,
    })
}

fn row_to_type_count(
    (complaint_type, count): (String, i64),
) -> Result<ComplaintTypeCount, ComplaintRepositoryError> {
    let count = u64::try_from(count)
        .map_err(|_| ComplaintRepositoryError::query(format!("negative count {count}")))?;
    Ok(ComplaintTypeCount::new(complaint_type, count))
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn find_matching(
        &self,
        scope: &ScopeFilter,
        state: CaseState,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ComplaintRow> = scoped_query(scope, state)
            .order(complaints::id.asc())
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_complaint).collect())
    }

    async fn count_types(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<ComplaintTypeCount>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let code = scope.equals().as_str();

        let rows: Vec<(String, i64)> = match scope.field() {
            ScopeField::Account => {
                complaints::table
                    .filter(complaints::account.eq(code))
                    .group_by(complaints::complaint_type)
                    .select((complaints::complaint_type, count_star()))
                    .load(&mut conn)
                    .await
            }
            ScopeField::CouncilDist => {
                complaints::table
                    .filter(complaints::council_dist.eq(code))
                    .group_by(complaints::complaint_type)
                    .select((complaints::complaint_type, count_star()))
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_type_count).collect()
    }
}
