//! Development data backing the in-memory stores.
//!
//! The server falls back to these stores when no database URL is configured.
//! Tests reuse them as a realistic starting point.

use chrono::NaiveDate;

use super::ports::{
    InMemoryAccountRepository, InMemoryComplaintRepository, InMemoryTokenRepository,
    InMemoryUserProfileRepository, StoredAccount,
};
use super::{Complaint, ComplaintDraft, PasswordHashError, UserId, UserProfile, hash_password};

/// Username of the development account.
pub const DEV_USERNAME: &str = "jdoe";
/// Password of the development account.
pub const DEV_PASSWORD: &str = "doe-1";
/// Stable id of the development account.
pub const DEV_USER_ID: &str = "5b1f0a34-8c2e-4d6b-9a7f-3e0c1d2b4a68";

/// In-memory stores seeded with the development data set.
#[derive(Debug, Clone)]
pub struct DevelopmentStores {
    /// Complaints across `NYCC01` and `NYCC02`.
    pub complaints: InMemoryComplaintRepository,
    /// Profile of the development user.
    pub profiles: InMemoryUserProfileRepository,
    /// The development login.
    pub accounts: InMemoryAccountRepository,
    /// Issued tokens, initially empty.
    pub tokens: InMemoryTokenRepository,
}

impl DevelopmentStores {
    /// Build the stores, hashing the development password.
    pub fn seeded() -> Result<Self, PasswordHashError> {
        let user_id = development_user_id();
        let accounts = InMemoryAccountRepository::new([(
            DEV_USERNAME.to_owned(),
            StoredAccount {
                user_id: user_id.clone(),
                password_hash: hash_password(DEV_PASSWORD)?,
            },
        )]);
        Ok(Self {
            complaints: InMemoryComplaintRepository::new(development_complaints()),
            profiles: InMemoryUserProfileRepository::new([UserProfile::new(
                user_id,
                "John Doe",
                "1",
                "Manhattan",
            )]),
            accounts,
            tokens: InMemoryTokenRepository::default(),
        })
    }
}

/// Id of the seeded development user.
pub fn development_user_id() -> UserId {
    UserId::from_uuid(uuid::Uuid::from_u128(0x5b1f_0a34_8c2e_4d6b_9a7f_3e0c_1d2b_4a68))
}

fn complaint(
    unique_key: &str,
    account: &str,
    council_dist: Option<&str>,
    dates: (Option<NaiveDate>, Option<NaiveDate>),
    kind: (&str, &str),
) -> Complaint {
    let (opendate, closedate) = dates;
    let (complaint_type, descriptor) = kind;
    Complaint::from(ComplaintDraft {
        unique_key: unique_key.to_owned(),
        account: account.to_owned(),
        council_dist: council_dist.map(str::to_owned),
        opendate,
        closedate,
        complaint_type: complaint_type.to_owned(),
        descriptor: descriptor.to_owned(),
        borough: "Manhattan".to_owned(),
    })
}

/// Complaints spread across `NYCC01` and `NYCC02` covering every case state.
pub fn development_complaints() -> Vec<Complaint> {
    let day = |month, day| NaiveDate::from_ymd_opt(2024, month, day);
    vec![
        complaint(
            "open_with_date",
            "NYCC01",
            Some("NYCC01"),
            (day(1, 1), None),
            ("Noise", "Loud Music"),
        ),
        complaint(
            "closed_with_both_dates",
            "NYCC01",
            Some("NYCC02"),
            (day(1, 1), day(1, 15)),
            ("Traffic", "Signal"),
        ),
        complaint(
            "no_dates",
            "NYCC01",
            None,
            (None, None),
            ("Other", "Test"),
        ),
        complaint(
            "closed_no_open_date",
            "NYCC01",
            Some("NYCC01"),
            (None, day(1, 20)),
            ("Parks", "Maintenance"),
        ),
        complaint(
            "different_district",
            "NYCC02",
            Some("NYCC01"),
            (day(2, 3), None),
            ("Health", "Rats"),
        ),
        complaint(
            "noise_case_2",
            "NYCC01",
            Some("NYCC01"),
            (day(1, 8), None),
            ("Noise", "Construction"),
        ),
        complaint(
            "noise_case_3",
            "NYCC01",
            Some("NYCC02"),
            (None, None),
            ("Noise", "Party"),
        ),
        complaint(
            "traffic_case_2",
            "NYCC01",
            Some("NYCC01"),
            (day(1, 12), day(1, 30)),
            ("Traffic", "Congestion"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{AccountRepository, UserProfileRepository};
    use rstest::rstest;

    #[rstest]
    fn development_user_id_matches_constant() {
        assert_eq!(development_user_id().as_ref(), DEV_USER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_stores_link_account_and_profile() {
        let stores = DevelopmentStores::seeded().expect("seed");
        let account = stores
            .accounts
            .find_credentials(DEV_USERNAME)
            .await
            .expect("read")
            .expect("account present");
        let profile = stores
            .profiles
            .find_by_user(&account.user_id)
            .await
            .expect("read");
        assert!(profile.is_some());
    }
}
