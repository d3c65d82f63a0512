use serde::{Deserialize, Serialize};

/// JWT claims structure asserting an authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

/// Authenticated identity attached to a request by the auth middleware.
///
/// Handlers behind the middleware extract this with `Extension<AuthUser>`
/// and use it for ownership checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthUser {
    pub user_id: i64,
}
