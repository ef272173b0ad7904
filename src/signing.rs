//! Score signatures
//!
//! A signature is `hex(SHA-256("{score}:{secret}"))`. Clients submit it with
//! their final score and the server recomputes it; no per-session secret is
//! stored.

use crate::auth::constant_time_eq;
use sha2::{Digest, Sha256};

/// Separator between the score and the secret in the hashed message
pub const SIGNATURE_DELIMITER: &str = ":";

/// Length of a signature in hex characters
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Errors from signing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Score signing secret is not configured")]
    MissingSecret,
}

/// Derive the signature for `score` under `secret`.
///
/// Surrounding whitespace is ignored, the same way configured secrets are
/// read. A blank secret is missing configuration, never a valid key.
pub fn generate_signature(score: u64, secret: &str) -> Result<String, SignatureError> {
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(SignatureError::MissingSecret);
    }

    let mut hasher = Sha256::new();
    hasher.update(score.to_string().as_bytes());
    hasher.update(SIGNATURE_DELIMITER.as_bytes());
    hasher.update(secret.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Check `signature` against `score`. Returns false when the secret is
/// missing or blank.
pub fn verify_signature(score: u64, signature: &str, secret: Option<&str>) -> bool {
    let expected = match secret.map(|s| generate_signature(score, s)) {
        Some(Ok(expected)) => expected,
        Some(Err(e)) => {
            tracing::warn!("Rejecting score signature: {}", e);
            return false;
        }
        None => {
            tracing::warn!("Rejecting score signature: {}", SignatureError::MissingSecret);
            return false;
        }
    };
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// Signs and verifies scores with the configured shared secret
#[derive(Clone)]
pub struct ScoreSigner {
    secret: Option<String>,
}

impl ScoreSigner {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Load the secret from the SCORE_SIGNING_SECRET environment variable
    pub fn from_env() -> Self {
        let signer = Self::new(std::env::var("SCORE_SIGNING_SECRET").ok());
        if !signer.is_configured() {
            tracing::warn!(
                "SCORE_SIGNING_SECRET is not set - score signing and verification will fail"
            );
        }
        signer
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn sign(&self, score: u64) -> Result<String, SignatureError> {
        let secret = self.secret.as_deref().ok_or(SignatureError::MissingSecret)?;
        generate_signature(score, secret)
    }

    pub fn verify(&self, score: u64, signature: &str) -> bool {
        verify_signature(score, signature, self.secret.as_deref())
    }
}

impl std::fmt::Debug for ScoreSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreSigner")
            .field("configured", &self.is_configured())
            .finish()
    }
}
