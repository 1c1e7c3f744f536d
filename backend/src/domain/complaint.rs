//! Complaint records and case-state predicates.

use chrono::NaiveDate;

/// A single complaint as recorded by the city.
///
/// Records are immutable once loaded. `account` is the district code of the
/// office that filed the complaint, `council_dist` the district the
/// complainant lives in (absent for some historical rows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    unique_key: String,
    account: String,
    council_dist: Option<String>,
    opendate: Option<NaiveDate>,
    closedate: Option<NaiveDate>,
    complaint_type: String,
    descriptor: String,
    borough: String,
}

/// Field values used to build a [`Complaint`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintDraft {
    /// City-wide complaint identifier.
    pub unique_key: String,
    /// Filing office district code.
    pub account: String,
    /// Resident district code, when recorded.
    pub council_dist: Option<String>,
    /// Day the case was opened.
    pub opendate: Option<NaiveDate>,
    /// Day the case was closed.
    pub closedate: Option<NaiveDate>,
    /// Category, e.g. `Noise`.
    pub complaint_type: String,
    /// Free-text subcategory.
    pub descriptor: String,
    /// Borough the complaint concerns.
    pub borough: String,
}

impl From<ComplaintDraft> for Complaint {
    fn from(draft: ComplaintDraft) -> Self {
        let ComplaintDraft {
            unique_key,
            account,
            council_dist,
            opendate,
            closedate,
            complaint_type,
            descriptor,
            borough,
        } = draft;
        Self {
            unique_key,
            account,
            council_dist,
            opendate,
            closedate,
            complaint_type,
            descriptor,
            borough,
        }
    }
}

impl Complaint {
    /// Globally unique complaint key.
    #[must_use]
    pub fn unique_key(&self) -> &str {
        self.unique_key.as_str()
    }

    /// District code of the filing office.
    #[must_use]
    pub fn account(&self) -> &str {
        self.account.as_str()
    }

    /// District code of the complainant's residence, when recorded.
    #[must_use]
    pub fn council_dist(&self) -> Option<&str> {
        self.council_dist.as_deref()
    }

    /// Day the case was opened.
    #[must_use]
    pub const fn opendate(&self) -> Option<NaiveDate> {
        self.opendate
    }

    /// Day the case was closed.
    #[must_use]
    pub const fn closedate(&self) -> Option<NaiveDate> {
        self.closedate
    }

    /// Complaint category used for the top-types ranking.
    #[must_use]
    pub fn complaint_type(&self) -> &str {
        self.complaint_type.as_str()
    }

    /// Subcategory text.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        self.descriptor.as_str()
    }

    /// Borough name as recorded.
    #[must_use]
    pub fn borough(&self) -> &str {
        self.borough.as_str()
    }

    /// Opened and not yet closed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.opendate.is_some() && self.closedate.is_none()
    }

    /// Has a close date, whether or not an open date was recorded.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closedate.is_some()
    }
}

/// Case-state predicate applied on top of an access scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseState {
    /// Every complaint in scope.
    All,
    /// Complaints satisfying [`Complaint::is_open`].
    Open,
    /// Complaints satisfying [`Complaint::is_closed`].
    Closed,
}

impl CaseState {
    /// Whether `complaint` satisfies this state.
    #[must_use]
    pub const fn matches(self, complaint: &Complaint) -> bool {
        match self {
            Self::All => true,
            Self::Open => complaint.is_open(),
            Self::Closed => complaint.is_closed(),
        }
    }
}

/// Number of in-scope complaints sharing a complaint type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintTypeCount {
    /// Shared complaint type.
    pub complaint_type: String,
    /// Complaints of that type in scope.
    pub count: u64,
}

impl ComplaintTypeCount {
    /// Pair a type with its count.
    pub fn new(complaint_type: impl Into<String>, count: u64) -> Self {
        Self {
            complaint_type: complaint_type.into(),
            count,
        }
    }
}
