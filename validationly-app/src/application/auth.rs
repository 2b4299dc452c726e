use super::ports::UserStore;
use super::{with_deadline, Dependency};
use crate::domain::{Plan, TrialUser, UserClaims, UserRecord};
use crate::infrastructure::auth::TokenService;
use crate::infrastructure::security::InputSanitizer;
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;
use uuid::Uuid;
use validationly_errors::AppError;

const ISSUED_TOKEN_TTL_DAYS: i64 = 30;
const TRIAL_TOKEN_TTL_DAYS: i64 = 7;
const TRIAL_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct TrialGrant {
    pub token: String,
    pub user: TrialUser,
}

/// Token issuance, trial start and bearer verification.
pub struct AuthService {
    tokens: Dependency<TokenService>,
    users: Dependency<dyn UserStore>,
    timeout: Duration,
}

impl AuthService {
    pub fn new(
        tokens: Dependency<TokenService>,
        users: Dependency<dyn UserStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            tokens,
            users,
            timeout,
        }
    }

    pub fn issue_token(&self, email: Option<&str>, user_id: Option<&str>) -> Result<String, AppError> {
        let missing = || AppError::InvalidInput("Email and userId are required".to_string());
        let email = InputSanitizer::optional_text(email, 320).ok_or_else(missing)?;
        let user_id = InputSanitizer::optional_text(user_id, 200).ok_or_else(missing)?;
        let tokens = self.tokens.get()?;

        let claims = UserClaims::new(
            user_id,
            email,
            Plan::Free,
            Utc::now(),
            ChronoDuration::days(ISSUED_TOKEN_TTL_DAYS),
        );
        let token = tokens.sign(&claims)?;
        tracing::info!("Issued token for user {}", claims.id);
        Ok(token)
    }

    pub async fn start_trial(&self, email: Option<&str>) -> Result<TrialGrant, AppError> {
        let email = InputSanitizer::email(email)
            .ok_or_else(|| AppError::InvalidInput("Valid email is required".to_string()))?;
        let tokens = self.tokens.get()?;

        let now = Utc::now();
        let trial_end = now + ChronoDuration::days(TRIAL_DAYS);
        let user_id = format!("user_{}_{}", now.timestamp_millis(), short_suffix());

        let claims = UserClaims::new(
            user_id.clone(),
            email.clone(),
            Plan::Free,
            now,
            ChronoDuration::days(TRIAL_TOKEN_TTL_DAYS),
        )
        .with_trial(now, trial_end);
        let token = tokens.sign(&claims)?;

        match self.users.optional() {
            Some(users) => {
                let record = UserRecord::new(user_id.clone(), email.clone(), Plan::Free);
                with_deadline(self.timeout, users.upsert(&record)).await?;
            }
            None => tracing::warn!("User store not configured; trial for {} not persisted", user_id),
        }

        tracing::info!("Started trial for user {}", user_id);
        Ok(TrialGrant {
            token,
            user: TrialUser {
                id: user_id,
                email,
                plan: Plan::Free,
                trial_start_date: now,
                trial_end_date: trial_end,
                trial_days_left: TRIAL_DAYS,
            },
        })
    }

    /// Resolves an `Authorization` header value to the caller's claims.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<UserClaims, AppError> {
        self.tokens.get()?.verify_bearer(authorization)
    }
}

fn short_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn service() -> AuthService {
        AuthService::new(
            Dependency::new("Token signing", Some(Arc::new(TokenService::new("test-secret")))),
            Dependency::missing("User store"),
            Duration::from_secs(1),
        )
    }

    #[test]
    fn test_issue_token_round_trip() {
        let auth = service();
        let token = auth.issue_token(Some("a@b.co"), Some("u-42")).unwrap();
        let claims = auth.authenticate(Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(claims.id, "u-42");
        assert_eq!(claims.email, "a@b.co");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 3600);
    }

    #[test]
    fn test_issue_token_requires_both_fields() {
        let auth = service();
        let err = auth.issue_token(Some("a@b.co"), None).unwrap_err();
        assert_eq!(err.user_message(), "Email and userId are required");
        assert!(auth.issue_token(Some(" "), Some("u")).is_err());
    }

    #[test]
    fn test_unconfigured_secret_is_a_server_error() {
        let auth = AuthService::new(
            Dependency::missing("Token signing"),
            Dependency::missing("User store"),
            Duration::from_secs(1),
        );
        let err = auth.issue_token(Some("a@b.co"), Some("u")).unwrap_err();
        assert_eq!(err.user_message(), "Token signing not configured");
    }

    #[tokio::test]
    async fn test_start_trial_without_store() {
        let auth = service();
        let grant = auth.start_trial(Some("founder@example.com")).await.unwrap();
        assert!(grant.user.id.starts_with("user_"));
        assert_eq!(grant.user.trial_days_left, 7);
        assert_eq!(
            (grant.user.trial_end_date - grant.user.trial_start_date).num_days(),
            7
        );

        let claims = auth.authenticate(Some(&format!("Bearer {}", grant.token))).unwrap();
        assert_eq!(claims.id, grant.user.id);
        assert!(claims.trial_end_date.is_some());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[tokio::test]
    async fn test_start_trial_rejects_bad_email() {
        let err = service().start_trial(Some("not-an-email")).await.unwrap_err();
        assert_eq!(err.user_message(), "Valid email is required");
    }
}
