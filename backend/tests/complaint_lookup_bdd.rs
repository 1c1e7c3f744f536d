//! Behaviour tests for district-scoped complaint lookups.
//!
//! Steps drive the complaint query service over the seeded in-memory stores.
use std::sync::{Arc, Mutex};

use complaint_backend::domain::dev_fixtures::DevelopmentStores;
use complaint_backend::domain::ports::{
    ComplaintsQuery, InMemoryComplaintRepository, InMemoryUserProfileRepository,
};
use complaint_backend::domain::{
    Complaint, ComplaintQueryService, ComplaintTypeCount, ConstituentFlag, Error, ErrorCode,
    UserId, UserProfile,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Service = ComplaintQueryService<InMemoryComplaintRepository, InMemoryUserProfileRepository>;

struct LookupWorld {
    runtime: Runtime,
    stores: Option<DevelopmentStores>,
    user: Option<UserId>,
    complaints: Option<Result<Vec<Complaint>, Error>>,
    top: Option<Result<Vec<ComplaintTypeCount>, Error>>,
}

impl LookupWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("tokio runtime"),
            stores: None,
            user: None,
            complaints: None,
            top: None,
        }
    }

    fn stores(&self) -> &DevelopmentStores {
        self.stores.as_ref().expect("stores seeded")
    }

    fn service(&self) -> Service {
        let stores = self.stores();
        ComplaintQueryService::new(
            Arc::new(stores.complaints.clone()),
            Arc::new(stores.profiles.clone()),
        )
    }

    fn list(&mut self, flag: ConstituentFlag, pick: Listing) {
        let service = self.service();
        let user = self.user.clone().expect("staff member");
        let result = self.runtime.block_on(async {
            match pick {
                Listing::All => service.list_all(&user, flag).await,
                Listing::Open => service.list_open(&user, flag).await,
                Listing::Closed => service.list_closed(&user, flag).await,
            }
        });
        self.complaints = Some(result);
    }

    fn listed(&self) -> &[Complaint] {
        match self.complaints.as_ref().expect("complaints listed") {
            Ok(complaints) => complaints,
            Err(err) => panic!("lookup failed: {err}"),
        }
    }

    fn listed_keys(&self) -> Vec<&str> {
        self.listed().iter().map(Complaint::unique_key).collect()
    }

    fn failure(&self) -> &Error {
        match self.complaints.as_ref().expect("complaints listed") {
            Ok(_) => panic!("lookup unexpectedly succeeded"),
            Err(err) => err,
        }
    }
}

impl std::fmt::Debug for LookupWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupWorld")
            .field("user", &self.user)
            .field("complaints", &self.complaints)
            .field("top", &self.top)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
enum Listing {
    All,
    Open,
    Closed,
}

#[fixture]
fn world() -> Mutex<LookupWorld> {
    Mutex::new(LookupWorld::new())
}

#[given("the development complaint store")]
fn the_development_complaint_store(world: &Mutex<LookupWorld>) {
    let mut world = world.lock().expect("world lock");
    world.stores = Some(DevelopmentStores::seeded().expect("seed stores"));
}

#[given("a staff member whose profile district is \"{district}\"")]
fn a_staff_member_in_district(world: &Mutex<LookupWorld>, district: String) {
    let mut world = world.lock().expect("world lock");
    let user = UserId::random();
    world
        .stores()
        .profiles
        .upsert(UserProfile::new(
            user.clone(),
            "Casey Staff",
            district.as_str(),
            "Manhattan",
        ))
        .expect("profile stored");
    world.user = Some(user);
}

#[given("a staff member without a profile")]
fn a_staff_member_without_a_profile(world: &Mutex<LookupWorld>) {
    world.lock().expect("world lock").user = Some(UserId::random());
}

#[when("they list all complaints")]
fn they_list_all_complaints(world: &Mutex<LookupWorld>) {
    let mut world = world.lock().expect("world lock");
    world.list(ConstituentFlag::OFF, Listing::All);
}

#[when("they list all complaints as constituents")]
fn they_list_all_complaints_as_constituents(world: &Mutex<LookupWorld>) {
    let mut world = world.lock().expect("world lock");
    world.list(ConstituentFlag::ON, Listing::All);
}

#[when("they list open complaints")]
fn they_list_open_complaints(world: &Mutex<LookupWorld>) {
    let mut world = world.lock().expect("world lock");
    world.list(ConstituentFlag::OFF, Listing::Open);
}

#[when("they list closed complaints")]
fn they_list_closed_complaints(world: &Mutex<LookupWorld>) {
    let mut world = world.lock().expect("world lock");
    world.list(ConstituentFlag::OFF, Listing::Closed);
}

#[when("they request the top complaint types")]
fn they_request_the_top_complaint_types(world: &Mutex<LookupWorld>) {
    let mut world = world.lock().expect("world lock");
    let service = world.service();
    let user = world.user.clone().expect("staff member");
    let result = world
        .runtime
        .block_on(async { service.top_types(&user, ConstituentFlag::OFF).await });
    world.top = Some(result);
}

#[then("every complaint was filed by \"{account}\"")]
fn every_complaint_was_filed_by(world: &Mutex<LookupWorld>, account: String) {
    let world = world.lock().expect("world lock");
    assert!(world.listed().iter().all(|c| c.account() == account));
}

#[then("{count} complaints are returned")]
fn complaints_are_returned(world: &Mutex<LookupWorld>, count: usize) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.listed().len(), count);
}

#[then("the first complaint is \"{key}\"")]
fn the_first_complaint_is(world: &Mutex<LookupWorld>, key: String) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.listed_keys().first().copied(), Some(key.as_str()));
}

#[then("the last complaint is \"{key}\"")]
fn the_last_complaint_is(world: &Mutex<LookupWorld>, key: String) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.listed_keys().last().copied(), Some(key.as_str()));
}

#[then("complaint \"{key}\" is not returned")]
fn complaint_is_not_returned(world: &Mutex<LookupWorld>, key: String) {
    let world = world.lock().expect("world lock");
    assert!(!world.listed_keys().contains(&key.as_str()));
}

#[then("complaint \"{key}\" is returned")]
fn complaint_is_returned(world: &Mutex<LookupWorld>, key: String) {
    let world = world.lock().expect("world lock");
    assert!(world.listed_keys().contains(&key.as_str()));
}

#[then("the top type is \"{complaint_type}\" with {count} complaints")]
fn the_top_type_is(world: &Mutex<LookupWorld>, complaint_type: String, count: u64) {
    let world = world.lock().expect("world lock");
    let top = world
        .top
        .as_ref()
        .expect("top types requested")
        .as_ref()
        .expect("top types succeed");
    assert_eq!(top.first(), Some(&ComplaintTypeCount::new(complaint_type, count)));
}

#[then("{count} types are returned")]
fn types_are_returned(world: &Mutex<LookupWorld>, count: usize) {
    let world = world.lock().expect("world lock");
    let top = world
        .top
        .as_ref()
        .expect("top types requested")
        .as_ref()
        .expect("top types succeed");
    assert_eq!(top.len(), count);
}

#[then("the lookup fails as not found")]
fn the_lookup_fails_as_not_found(world: &Mutex<LookupWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.failure().code(), ErrorCode::NotFound);
}

#[then("the lookup fails as an internal error")]
fn the_lookup_fails_as_an_internal_error(world: &Mutex<LookupWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.failure().code(), ErrorCode::InternalError);
}

#[scenario(
    path = "tests/features/complaint_lookup.feature",
    name = "Filing scope only returns complaints filed by the caller's office"
)]
fn filing_scope_only_returns_own_office(world: Mutex<LookupWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/complaint_lookup.feature",
    name = "Resident scope is ordered newest first with undated complaints last"
)]
fn resident_scope_is_newest_first_with_undated_last(world: Mutex<LookupWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/complaint_lookup.feature",
    name = "Complaints without dates are neither open nor closed"
)]
fn undated_complaints_are_neither_open_nor_closed(world: Mutex<LookupWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/complaint_lookup.feature",
    name = "Top complaint types are ranked by frequency"
)]
fn top_complaint_types_are_ranked_by_frequency(world: Mutex<LookupWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/complaint_lookup.feature",
    name = "A staff member without a profile is told it was not found"
)]
fn missing_profile_is_not_found(world: Mutex<LookupWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/complaint_lookup.feature",
    name = "A malformed profile district is an internal error"
)]
fn malformed_profile_district_is_internal_error(world: Mutex<LookupWorld>) {
    drop(world);
}
