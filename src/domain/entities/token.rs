use serde::{Deserialize, Serialize};

use crate::entities::user::{Role, UserProfile};

/// Returned by register and login: the bearer credential plus the
/// authenticated profile, which the frontend caches.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// The numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, crate::errors::AuthError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| crate::errors::AuthError::InvalidUserId)
    }
}
