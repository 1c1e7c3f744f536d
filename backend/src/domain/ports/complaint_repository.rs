//! Driven port for reading complaint records.
//!
//! Adapters filter by scope and case state and group by complaint type; the
//! domain service owns ordering and truncation so every store behaves alike.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{CaseState, Complaint, ComplaintTypeCount, ScopeFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading complaints.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "complaint repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "complaint repository query failed: {message}",
    }
}

/// Port for scoped complaint reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Return complaints inside `scope` that satisfy `state`, in store order.
    async fn find_matching(
        &self,
        scope: &ScopeFilter,
        state: CaseState,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Count complaints inside `scope` per complaint type, in no particular order.
    async fn count_types(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<ComplaintTypeCount>, ComplaintRepositoryError>;
}

/// Complaint store held in memory, used when no database is configured.
#[derive(Debug, Default, Clone)]
pub struct InMemoryComplaintRepository {
    complaints: Arc<RwLock<Vec<Complaint>>>,
}

impl InMemoryComplaintRepository {
    /// Build a store preloaded with `complaints` in the given order.
    pub fn new(complaints: impl IntoIterator<Item = Complaint>) -> Self {
        Self {
            complaints: Arc::new(RwLock::new(complaints.into_iter().collect())),
        }
    }

    /// Append a complaint to the end of the store.
    pub fn insert(&self, complaint: Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut guard = self
            .complaints
            .write()
            .map_err(|_| ComplaintRepositoryError::connection("complaint store lock poisoned"))?;
        guard.push(complaint);
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        self.complaints
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| ComplaintRepositoryError::connection("complaint store lock poisoned"))
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn find_matching(
        &self,
        scope: &ScopeFilter,
        state: CaseState,
    ) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|complaint| scope.matches(complaint) && state.matches(complaint))
            .collect())
    }

    async fn count_types(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<ComplaintTypeCount>, ComplaintRepositoryError> {
        let counts = self
            .snapshot()?
            .iter()
            .filter(|complaint| scope.matches(complaint))
            .fold(BTreeMap::<String, u64>::new(), |mut counts, complaint| {
                *counts
                    .entry(complaint.complaint_type().to_owned())
                    .or_default() += 1;
                counts
            });
        Ok(counts
            .into_iter()
            .map(|(complaint_type, count)| ComplaintTypeCount::new(complaint_type, count))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ComplaintDraft, DistrictCode, RawDistrict, ScopeField};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn complaint(key: &str, account: &str, complaint_type: &str, closed: bool) -> Complaint {
        Complaint::from(ComplaintDraft {
            unique_key: key.to_owned(),
            account: account.to_owned(),
            council_dist: Some("NYCC02".to_owned()),
            opendate: NaiveDate::from_ymd_opt(2024, 1, 2),
            closedate: closed.then(|| NaiveDate::from_ymd_opt(2024, 2, 1)).flatten(),
            complaint_type: complaint_type.to_owned(),
            descriptor: "Loud Music/Party".to_owned(),
            borough: "MANHATTAN".to_owned(),
        })
    }

    #[fixture]
    fn repository() -> InMemoryComplaintRepository {
        InMemoryComplaintRepository::new([
            complaint("a", "NYCC01", "Noise", false),
            complaint("b", "NYCC01", "Noise", true),
            complaint("c", "NYCC03", "Noise", false),
            complaint("d", "NYCC01", "Traffic", true),
        ])
    }

    fn account_scope(district: u32) -> ScopeFilter {
        let code = DistrictCode::format(&RawDistrict::Number(district)).expect("district");
        ScopeFilter::new(ScopeField::Account, code)
    }

    #[rstest]
    #[case(CaseState::All, &["a", "b", "d"])]
    #[case(CaseState::Open, &["a"])]
    #[case(CaseState::Closed, &["b", "d"])]
    #[tokio::test]
    async fn find_matching_filters_scope_and_state(
        repository: InMemoryComplaintRepository,
        #[case] state: CaseState,
        #[case] expected: &[&str],
    ) {
        let found = repository
            .find_matching(&account_scope(1), state)
            .await
            .expect("in-memory read");
        let keys: Vec<&str> = found.iter().map(Complaint::unique_key).collect();
        assert_eq!(keys, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn count_types_groups_scoped_complaints(repository: InMemoryComplaintRepository) {
        let counts = repository
            .count_types(&account_scope(1))
            .await
            .expect("in-memory read");
        assert_eq!(
            counts,
            vec![
                ComplaintTypeCount::new("Noise", 2),
                ComplaintTypeCount::new("Traffic", 1),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn count_types_handles_many_distinct_types() {
        let repository = InMemoryComplaintRepository::new((0..500).map(|n| {
            complaint(&format!("k{n}"), "NYCC01", &format!("Type{:03}", n % 250), false)
        }));
        let counts = repository
            .count_types(&account_scope(1))
            .await
            .expect("in-memory read");
        assert_eq!(counts.len(), 250);
        assert!(counts.iter().all(|entry| entry.count == 2));
        assert_eq!(
            counts.first(),
            Some(&ComplaintTypeCount::new("Type000", 2))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn insert_appends_to_store(repository: InMemoryComplaintRepository) {
        repository
            .insert(complaint("e", "NYCC03", "Health", false))
            .expect("insert");
        let found = repository
            .find_matching(&account_scope(3), CaseState::All)
            .await
            .expect("in-memory read");
        assert_eq!(found.len(), 2);
    }
}
