// Public API - what other modules can use
pub use middleware::jwt_auth;
pub use types::{AuthUser, Claims};

// Internal modules
mod middleware;
pub mod password;
pub mod token;
mod types;
