use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::token::Claims, errors::AuthError};

/// Extractor for authenticated claims. Rejects with 401 when the request
/// carried no valid token. Usage: add `claims: AuthClaims` to a handler.
#[derive(Debug)]
pub struct AuthClaims(pub Claims);

impl FromRequest for AuthClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthClaims(claims.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

/// Extractor for endpoints that serve anonymous callers but enrich the
/// response when a valid token happens to be present (project listings,
/// blog detail).
#[derive(Debug)]
pub struct MaybeClaims(pub Option<Claims>);

impl FromRequest for MaybeClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(MaybeClaims(req.extensions().get::<Claims>().cloned())))
    }
}
