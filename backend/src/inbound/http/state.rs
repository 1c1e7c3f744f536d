//! Shared HTTP adapter state.
//!
//! Handlers and extractors receive this state via `actix_web::web::Data` so
//! they depend only on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ComplaintsQuery, LoginService, TokenAuthenticator};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use complaint_backend::domain::dev_fixtures::DevelopmentStores;
/// use complaint_backend::domain::{ComplaintQueryService, TokenLoginService};
/// use complaint_backend::inbound::http::state::HttpState;
///
/// let stores = DevelopmentStores::seeded().expect("seed");
/// let login = Arc::new(TokenLoginService::new(
///     Arc::new(stores.accounts),
///     Arc::new(stores.tokens),
///     Arc::new(mockable::DefaultClock),
/// ));
/// let complaints = Arc::new(ComplaintQueryService::new(
///     Arc::new(stores.complaints),
///     Arc::new(stores.profiles),
/// ));
/// let state = HttpState::new(login.clone(), login, complaints);
/// let _query = state.complaints.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Exchanges credentials for a token.
    pub login: Arc<dyn LoginService>,
    /// Resolves presented tokens to users.
    pub tokens: Arc<dyn TokenAuthenticator>,
    /// District-scoped complaint reads.
    pub complaints: Arc<dyn ComplaintsQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the HTTP adapter.
    pub fn new(
        login: Arc<dyn LoginService>,
        tokens: Arc<dyn TokenAuthenticator>,
        complaints: Arc<dyn ComplaintsQuery>,
    ) -> Self {
        Self {
            login,
            tokens,
            complaints,
        }
    }
}
