use tracing::{debug, warn};

use crate::shared::AppError;

/// bcrypt work factor. Deliberately above the crate default so each
/// hash/verify call stays expensive against offline brute force.
const BCRYPT_COST: u32 = 14;

/// Hashes a plaintext password with a per-call random salt.
///
/// Failure here means the underlying RNG or bcrypt itself failed; callers
/// must abort signup rather than store anything weaker.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| {
        warn!(error = %e, "Failed to hash password");
        AppError::Internal
    })
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// A malformed or corrupt stored hash verifies as false rather than
/// surfacing an error, so callers see exactly one signal: match or no match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(password, stored_hash) {
        Ok(matches) => matches,
        Err(e) => {
            debug!(error = %e, "Stored hash could not be parsed, treating as mismatch");
            false
        }
    }
}
