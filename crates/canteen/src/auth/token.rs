//! HS256 bearer tokens.

use super::{AuthError, Principal};
use crate::clock::Clock;
use crate::model::{Role, UserId};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Turns a presented token into a principal, or fails with `Unauthenticated`.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 JSON Web Tokens.
///
/// Expiry is checked against the injected [`Clock`] rather than the system time.
pub struct JwtTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokens {
    pub fn new(secret: &str, expiry_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_secs: i64::try_from(expiry_secs).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Signs a token for `principal`, valid for the configured lifetime.
    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        let iat = self.clock.now().timestamp();
        let claims = Claims {
            id: principal.id,
            username: principal.username.clone(),
            role: principal.role,
            iat,
            exp: iat.saturating_add(self.expiry_secs),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                warn!(error = %e, "Token rejected");
                AuthError::Unauthenticated("Invalid token".into())
            })?;
        Ok(data.claims)
    }
}

impl TokenVerifier for JwtTokens {
    fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.decode(token)?;
        if claims.exp <= self.clock.now().timestamp() {
            warn!(user = %claims.username, "Token expired");
            return Err(AuthError::Unauthenticated("Token expired".into()));
        }
        Ok(Principal {
            id: claims.id,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    const NOW: i64 = 1_760_745_600_000;

    fn tokens_at(millis: i64) -> JwtTokens {
        JwtTokens::new("test", 604_800, Arc::new(FixedClock::at_millis(millis)))
    }

    fn cashier() -> Principal {
        Principal {
            id: UserId(7),
            username: "cashier1".into(),
            role: Role::Cashier,
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let tokens = tokens_at(NOW);
        let token = tokens.issue(&cashier()).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), cashier());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = tokens_at(NOW).issue(&cashier()).unwrap();
        let eight_days_later = tokens_at(NOW + 8 * 24 * 3600 * 1000);
        assert_eq!(
            eight_days_later.verify(&token),
            Err(AuthError::Unauthenticated("Token expired".into()))
        );
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtTokens::new("other", 60, Arc::new(FixedClock::at_millis(NOW)));
        let token = other.issue(&cashier()).unwrap();
        assert!(matches!(
            tokens_at(NOW).verify(&token),
            Err(AuthError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            tokens_at(NOW).verify("not.a.token"),
            Err(AuthError::Unauthenticated(_))
        ));
    }
}
