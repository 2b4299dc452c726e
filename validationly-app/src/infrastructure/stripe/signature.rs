use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use validationly_errors::AppError;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Checks `Stripe-Signature` headers of the form `t=<unix>,v1=<hex>[,v1=...]`.
pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: u64,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> Result<(), AppError> {
        self.verify_at(payload, header, Utc::now().timestamp())
    }

    pub fn verify_at(&self, payload: &[u8], header: Option<&str>, now: i64) -> Result<(), AppError> {
        let header = header
            .ok_or_else(|| AppError::InvalidSignature("missing signature header".to_string()))?;

        let mut timestamp = None;
        let mut candidates = Vec::new();
        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
                Some(("v1", value)) => candidates.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| AppError::InvalidSignature("missing timestamp".to_string()))?;
        if candidates.is_empty() {
            return Err(AppError::InvalidSignature("no v1 signature".to_string()));
        }
        if now.abs_diff(timestamp) > self.tolerance_secs {
            return Err(AppError::InvalidSignature(
                "timestamp outside tolerance".to_string(),
            ));
        }

        let expected = self.digest(timestamp, payload)?;
        let matched = candidates.iter().any(|candidate| {
            hex::decode(candidate)
                .map(|sig| bool::from(sig.as_slice().ct_eq(expected.as_slice())))
                .unwrap_or(false)
        });

        if matched {
            Ok(())
        } else {
            Err(AppError::InvalidSignature("signature mismatch".to_string()))
        }
    }

    /// Builds a header value the way Stripe does.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> Result<String, AppError> {
        let digest = self.digest(timestamp, payload)?;
        Ok(format!("t={},v1={}", timestamp, hex::encode(digest)))
    }

    fn digest(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("invalid webhook secret: {}", e)))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &[u8] = br#"{"type":"checkout.session.completed"}"#;

    #[test]
    fn test_accepts_own_signature() {
        let verifier = WebhookVerifier::new("whsec_test");
        let header = verifier.sign(1_700_000_000, PAYLOAD).unwrap();
        assert!(verifier
            .verify_at(PAYLOAD, Some(&header), 1_700_000_100)
            .is_ok());
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let verifier = WebhookVerifier::new("whsec_test");
        let header = verifier.sign(1_700_000_000, PAYLOAD).unwrap();
        let result = verifier.verify_at(b"{}", Some(&header), 1_700_000_000);
        assert!(matches!(result, Err(AppError::InvalidSignature(_))));
    }

    #[test]
    fn test_rejects_other_secret() {
        let header = WebhookVerifier::new("whsec_other")
            .sign(1_700_000_000, PAYLOAD)
            .unwrap();
        let verifier = WebhookVerifier::new("whsec_test");
        assert!(verifier
            .verify_at(PAYLOAD, Some(&header), 1_700_000_000)
            .is_err());
    }

    #[test]
    fn test_rejects_stale_timestamp() {
        let verifier = WebhookVerifier::new("whsec_test");
        let header = verifier.sign(1_700_000_000, PAYLOAD).unwrap();
        assert!(verifier
            .verify_at(PAYLOAD, Some(&header), 1_700_000_301)
            .is_err());
    }

    #[test]
    fn test_rejects_malformed_headers() {
        let verifier = WebhookVerifier::new("whsec_test");
        assert!(verifier.verify_at(PAYLOAD, None, 0).is_err());
        assert!(verifier.verify_at(PAYLOAD, Some("garbage"), 0).is_err());
        assert!(verifier.verify_at(PAYLOAD, Some("t=0"), 0).is_err());
        assert!(verifier.verify_at(PAYLOAD, Some("t=0,v1=zz"), 0).is_err());
    }

    #[test]
    fn test_extreme_timestamps_are_rejected() {
        let verifier = WebhookVerifier::new("whsec_test");
        for timestamp in [i64::MIN, i64::MAX] {
            let header = format!("t={},v1=00", timestamp);
            let result = verifier.verify_at(b"{}", Some(&header), 1_700_000_000);
            assert!(matches!(result, Err(AppError::InvalidSignature(_))));
        }
        let result = verifier.verify_at(b"{}", Some("t=0,v1=00"), i64::MIN);
        assert!(matches!(result, Err(AppError::InvalidSignature(_))));
    }

    #[test]
    fn test_any_matching_v1_is_enough() {
        let verifier = WebhookVerifier::new("whsec_test");
        let header = verifier.sign(1_700_000_000, PAYLOAD).unwrap();
        let rotated = header.replacen("v1=", "v1=deadbeef,v1=", 1);
        assert!(verifier
            .verify_at(PAYLOAD, Some(&rotated), 1_700_000_000)
            .is_ok());
    }
}
