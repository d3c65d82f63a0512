use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, instrument};

use super::types::Claims;
use crate::shared::AppError;

/// Token lifetime: one hour from issuance.
const TOKEN_TTL_SECS: i64 = 3600;

/// Service for issuing and verifying RS256-signed identity assertions.
///
/// Holds the key pair loaded once at startup; immutable afterwards, so it is
/// shared via `Arc` and safe to call from any number of request handlers.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Builds a token service from PEM-encoded key material.
    pub fn from_pem(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            error!(error = %e, "Failed to parse private signing key PEM");
            AppError::Internal
        })?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            error!(error = %e, "Failed to parse public verification key PEM");
            AppError::Internal
        })?;

        // Zero leeway: a token past its exp is invalid at verification time
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Loads the key pair from two PEM files on disk.
    ///
    /// Called once at startup; a missing or unreadable file is fatal there,
    /// never deferred to the first request.
    pub fn from_pem_files(
        private_key_path: &str,
        public_key_path: &str,
    ) -> Result<Self, AppError> {
        let private_pem = std::fs::read(private_key_path).map_err(|e| {
            error!(path = %private_key_path, error = %e, "Failed to read private key file");
            AppError::Internal
        })?;
        let public_pem = std::fs::read(public_key_path).map_err(|e| {
            error!(path = %public_key_path, error = %e, "Failed to read public key file");
            AppError::Internal
        })?;

        Self::from_pem(&private_pem, &public_pem)
    }

    /// Issues a signed assertion for the given user id, valid for one hour.
    #[instrument(skip(self))]
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp() as usize,
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp() as usize,
        };

        debug!(user_id, exp = claims.exp, "Issuing token");

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            AppError::Internal
        })
    }

    /// Verifies a signed assertion and returns its claims.
    ///
    /// Bad signature, expired token, and unparseable payload all collapse
    /// into the same generic unauthorized error; the caller cannot tell
    /// which check failed.
    #[instrument(skip(self, token))]
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token verification failed");
                AppError::Unauthorized("Token is not valid".to_string())
            })
    }
}
