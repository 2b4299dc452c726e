use crate::domain::UserClaims;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use validationly_errors::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// HS256 signer/verifier for user tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn sign(&self, claims: &UserClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<UserClaims, AppError> {
        decode::<UserClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::Unauthorized
            })
    }

    /// Verifies the value of an `Authorization` header.
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<UserClaims, AppError> {
        let Some(header) = header else {
            tracing::debug!("Token rejected: missing authorization header");
            return Err(AppError::Unauthorized);
        };
        let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
            tracing::debug!("Token rejected: not a bearer credential");
            return Err(AppError::Unauthorized);
        };
        self.verify(token.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Plan;
    use chrono::{Duration, Utc};

    fn claims(ttl: Duration) -> UserClaims {
        UserClaims::new("user_1", "founder@example.com", Plan::Free, Utc::now(), ttl)
    }

    #[test]
    fn test_round_trip() {
        let service = TokenService::new("test-secret");
        let token = service.sign(&claims(Duration::days(7))).unwrap();
        let verified = service.verify(&token).unwrap();
        assert_eq!(verified.id, "user_1");
        assert_eq!(verified.email, "founder@example.com");
        assert_eq!(verified.plan, Plan::Free);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new("test-secret");
        let expired = UserClaims::new(
            "user_1",
            "founder@example.com",
            Plan::Free,
            Utc::now() - Duration::days(8),
            Duration::days(7),
        );
        let token = service.sign(&expired).unwrap();
        assert!(matches!(service.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenService::new("secret-a")
            .sign(&claims(Duration::hours(1)))
            .unwrap();
        let other = TokenService::new("secret-b");
        assert!(matches!(other.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_bearer_prefix_is_required() {
        let service = TokenService::new("test-secret");
        let token = service.sign(&claims(Duration::hours(1))).unwrap();

        assert!(service.verify_bearer(Some(&format!("Bearer {}", token))).is_ok());
        assert!(service.verify_bearer(Some(&token)).is_err());
        assert!(service.verify_bearer(Some("Basic abc")).is_err());
        assert!(service.verify_bearer(None).is_err());
    }
}
