//! JWT Token Codec
//! Mission: Issue and verify signed, time-bounded identity tokens

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Claims carried by a rigbook token: subject (username) plus the
/// issued-at / expiry pair. Roles are resolved from the store per request,
/// never baked into the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Why verification rejected a token.
///
/// Expiry is only reported once the signature has checked out; a token
/// signed under the wrong secret is `InvalidSignature` no matter how stale
/// its claims are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    InvalidSignature,
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "Malformed token"),
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::Expired => write!(f, "Expired token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// HS256 codec over a process-wide signing secret.
///
/// The secret is fixed at construction and read-only afterwards, so the
/// codec is safe to share across request tasks without locking.
pub struct JwtCodec {
    secret: String,
}

impl JwtCodec {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a signed token for `subject` valid for `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: chrono::Duration) -> Result<String> {
        let now = Utc::now();
        let expiration = now.checked_add_signed(ttl).context("Invalid timestamp")?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        debug!("Issuing token for {}, expires at {}", subject, claims.exp);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    /// Verify a token and return its claims.
    ///
    /// Signature comparison is constant-time (via the jsonwebtoken crate)
    /// and expiry is validated with zero leeway. Pure computation, no I/O.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-123";

    /// Encode claims directly, bypassing `issue`, so tests can craft
    /// already-expired tokens without sleeping.
    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = JwtCodec::new(TEST_SECRET.to_string());

        let token = codec.issue("alice", Duration::hours(1)).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = JwtCodec::new(TEST_SECRET.to_string());

        assert_eq!(codec.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
        assert_eq!(
            codec.verify("aaaa.bbbb.cccc"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let issuer = JwtCodec::new(TEST_SECRET.to_string());
        let verifier = JwtCodec::new("another-secret-key-that-is-long-enough".to_string());

        let token = issuer.issue("alice", Duration::hours(1)).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_is_expired() {
        let codec = JwtCodec::new(TEST_SECRET.to_string());

        let now = Utc::now().timestamp() as usize;
        let stale = Claims {
            sub: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode_raw(&stale, TEST_SECRET);

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        // An expired token under the wrong secret must report the
        // signature failure, not the expiry.
        let codec = JwtCodec::new(TEST_SECRET.to_string());

        let now = Utc::now().timestamp() as usize;
        let stale = Claims {
            sub: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode_raw(&stale, "another-secret-key-that-is-long-enough");

        assert_eq!(codec.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_short_ttl_still_verifies_before_expiry() {
        let codec = JwtCodec::new(TEST_SECRET.to_string());

        let token = codec.issue("bob", Duration::seconds(30)).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.exp - claims.iat, 30);
    }
}
