//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod complaint_repository;
mod complaints_query;
mod login_service;
mod token_authenticator;
mod token_repository;
mod user_profile_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{
    AccountRepository, AccountRepositoryError, InMemoryAccountRepository, StoredAccount,
};
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{
    ComplaintRepository, ComplaintRepositoryError, InMemoryComplaintRepository,
};
pub use complaints_query::ComplaintsQuery;
#[cfg(test)]
pub use complaints_query::MockComplaintsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use token_authenticator::MockTokenAuthenticator;
pub use token_authenticator::TokenAuthenticator;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
pub use token_repository::{InMemoryTokenRepository, TokenRepository, TokenRepositoryError};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{
    InMemoryUserProfileRepository, UserProfileRepository, UserProfileRepositoryError,
};
