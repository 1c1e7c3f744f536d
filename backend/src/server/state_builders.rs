//! Builders wiring driving ports onto Diesel or in-memory repositories.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use complaint_backend::domain::dev_fixtures::DevelopmentStores;
use complaint_backend::domain::ports::{
    AccountRepository, ComplaintRepository, TokenRepository, UserProfileRepository,
};
use complaint_backend::domain::{ComplaintQueryService, PasswordHashError, TokenLoginService};
use complaint_backend::inbound::http::state::HttpState;
use complaint_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselComplaintRepository, DieselTokenRepository,
    DieselUserProfileRepository,
};

use super::ServerConfig;

/// Wire the services over one set of repositories.
fn assemble<C, P, A, T>(complaints: C, profiles: P, accounts: A, tokens: T) -> HttpState
where
    C: ComplaintRepository + 'static,
    P: UserProfileRepository + 'static,
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let login = Arc::new(TokenLoginService::new(
        Arc::new(accounts),
        Arc::new(tokens),
        clock,
    ));
    let query = Arc::new(ComplaintQueryService::new(
        Arc::new(complaints),
        Arc::new(profiles),
    ));
    HttpState::new(login.clone(), login, query)
}

fn diesel_state(pool: &DbPool) -> HttpState {
    info!("serving complaints from PostgreSQL");
    assemble(
        DieselComplaintRepository::new(pool.clone()),
        DieselUserProfileRepository::new(pool.clone()),
        DieselAccountRepository::new(pool.clone()),
        DieselTokenRepository::new(pool.clone()),
    )
}

fn in_memory_state() -> Result<HttpState, PasswordHashError> {
    info!("no database configured; serving in-memory development data");
    let DevelopmentStores {
        complaints,
        profiles,
        accounts,
        tokens,
    } = DevelopmentStores::seeded()?;
    Ok(assemble(complaints, profiles, accounts, tokens))
}

/// Build the shared HTTP state, preferring the database when configured.
///
/// # Errors
/// Fails when the development account password cannot be hashed.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let state = config.db_pool.as_ref().map_or_else(
        || in_memory_state().map_err(std::io::Error::other),
        |pool| Ok(diesel_state(pool)),
    )?;
    Ok(web::Data::new(state))
}
