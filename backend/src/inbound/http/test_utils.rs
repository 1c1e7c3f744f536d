//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::dev_fixtures::{DEV_PASSWORD, DEV_USERNAME, DevelopmentStores};
use crate::domain::{AuthToken, ComplaintQueryService, LoginCredentials, TokenLoginService};

use super::error::{json_error_handler, query_error_handler};
use super::state::HttpState;

/// HTTP state backed by freshly seeded development stores.
pub fn development_state() -> web::Data<HttpState> {
    let stores = DevelopmentStores::seeded().expect("development stores seed");
    let login = Arc::new(TokenLoginService::new(
        Arc::new(stores.accounts),
        Arc::new(stores.tokens),
        Arc::new(DefaultClock),
    ));
    let complaints = Arc::new(ComplaintQueryService::new(
        Arc::new(stores.complaints),
        Arc::new(stores.profiles),
    ));
    web::Data::new(HttpState::new(login.clone(), login, complaints))
}

/// Log the development user in and return their token.
pub async fn development_token(state: &HttpState) -> AuthToken {
    let credentials =
        LoginCredentials::try_from_parts(DEV_USERNAME, DEV_PASSWORD).expect("credential shape");
    state.login.login(&credentials).await.expect("login")
}

/// JSON extractor config mapping failures to `400 invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor config mapping failures to `400 invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
