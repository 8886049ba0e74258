use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::token::Claims;
use crate::entities::user::User;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Issues and validates the bearer credential. The token carries the numeric
/// user id in `sub` together with the role so handlers can gate on it
/// without a lookup.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::hours(config.jwt_expiration_hours),
        }
    }

    pub fn create_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    pub fn decode_token(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}
