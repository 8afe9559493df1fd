//! HS256 session-token decoding and validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed or badly-signed token")]
    Malformed(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a bearer token and yields the session claims it carries.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError>;
}

/// Symmetric HS256 implementation of [`JwtValidator`].
///
/// Also able to mint tokens, which the registration endpoint and test
/// fixtures use; production token issuance may live elsewhere.
pub struct Hs256JwtValidator {
    decoding: DecodingKey,
    encoding: EncodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            decoding: DecodingKey::from_secret(&secret),
            encoding: EncodingKey::from_secret(&secret),
        }
    }

    /// Sign the given claims into a compact token.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding,
        )?)
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // The payload carries RFC 3339 timestamps instead of numeric
        // `exp`/`iat`; the time window is checked by `validate_claims`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use chrono::Duration;
    use crm_core::UserId;

    fn claims(now: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            sub: UserId::new(),
            roles: vec![Role::ADMIN],
            is_superuser: true,
            issued_at: now,
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn issued_token_validates_with_same_secret() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let now = Utc::now();
        let claims = claims(now);

        let token = validator.issue(&claims).unwrap();
        let decoded = validator.validate(&token, now).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = Hs256JwtValidator::new(b"secret-a".to_vec());
        let verifier = Hs256JwtValidator::new(b"secret-b".to_vec());
        let now = Utc::now();

        let token = issuer.issue(&claims(now)).unwrap();
        let err = verifier.validate(&token, now).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn expired_token_is_rejected_at_validation() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let issued = Utc::now() - Duration::hours(1);
        let token = validator.issue(&claims(issued)).unwrap();

        let err = validator.validate(&token, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            TokenError::Claims(TokenValidationError::Expired)
        ));
    }
}
