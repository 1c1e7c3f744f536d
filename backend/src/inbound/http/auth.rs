//! Token authentication extractor.
//!
//! Complaint handlers take an [`AuthenticatedUser`] argument. Extraction reads
//! `Authorization: Token <key>` (or `Bearer <key>`), resolves the key through
//! the [`TokenAuthenticator`](crate::domain::ports::TokenAuthenticator) port and
//! rejects the request with `401` before the handler body runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{AuthToken, Error, UserId};

use super::state::HttpState;

/// Message returned when no usable `Authorization` header is present.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Authentication credentials were not provided.";
/// Message returned when the presented token is unknown or malformed.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

const ACCEPTED_SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Identity of the caller, resolved from their API token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// User the token belongs to.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Unwrap into the user id.
    #[must_use]
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

/// Split an `Authorization` header value into a token.
///
/// Returns `Ok(None)` when the header uses an unrelated scheme, so callers
/// can report missing credentials rather than an invalid token.
fn token_from_header(value: &str) -> Result<Option<AuthToken>, Error> {
    let mut parts = value.split_whitespace();
    let Some(scheme) = parts.next() else {
        return Ok(None);
    };
    if !ACCEPTED_SCHEMES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(scheme))
    {
        return Ok(None);
    }
    let (Some(key), None) = (parts.next(), parts.next()) else {
        return Err(Error::unauthorized(INVALID_TOKEN_MESSAGE));
    };
    AuthToken::parse(key)
        .map(Some)
        .map_err(|_| Error::unauthorized(INVALID_TOKEN_MESSAGE))
}

fn presented_token(req: &HttpRequest) -> Result<AuthToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS_MESSAGE))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized(INVALID_TOKEN_MESSAGE))?;
    token_from_header(value)?.ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS_MESSAGE))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let presented = presented_token(req);
        let registered = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = presented?;
            let state =
                registered.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let resolved = state.tokens.authenticate(&token).await?;
            resolved.map(AuthenticatedUser).ok_or_else(|| {
                debug!(token = %token.fingerprint(), "rejected unknown api token");
                Error::unauthorized(INVALID_TOKEN_MESSAGE)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const KEY: &str = "0123456789abcdef0123456789abcdef01234567";

    #[rstest]
    #[case(format!("Token {KEY}"))]
    #[case(format!("Bearer {KEY}"))]
    #[case(format!("token   {KEY}"))]
    fn accepted_schemes_yield_tokens(#[case] header: String) {
        let token = token_from_header(&header)
            .expect("well formed")
            .expect("token present");
        assert_eq!(token.as_str(), KEY);
    }

    #[rstest]
    #[case("Basic amRvZTpkb2UtMQ==")]
    #[case("")]
    fn other_schemes_count_as_missing(#[case] header: &str) {
        assert!(token_from_header(header).expect("no error").is_none());
    }

    #[rstest]
    #[case("Token")]
    #[case("Token abc def")]
    #[case("Token not-hex!")]
    fn malformed_tokens_are_unauthorized(#[case] header: &str) {
        let err = token_from_header(header).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_TOKEN_MESSAGE);
    }
}
