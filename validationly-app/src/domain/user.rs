use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            other => Err(format!("unknown plan '{}'", other)),
        }
    }
}

/// JWT payload. `iat`/`exp` are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    pub id: String,
    pub email: String,
    pub plan: Plan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end_date: Option<DateTime<Utc>>,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        plan: Plan,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            plan,
            trial_start_date: None,
            trial_end_date: None,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn with_trial(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.trial_start_date = Some(start);
        self.trial_end_date = Some(end);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub plan: Plan,
    pub stripe_customer_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, email: impl Into<String>, plan: Plan) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            plan,
            stripe_customer_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_customer(mut self, customer_id: Option<String>) -> Self {
        self.stripe_customer_id = customer_id;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialUser {
    pub id: String,
    pub email: String,
    pub plan: Plan,
    pub trial_start_date: DateTime<Utc>,
    pub trial_end_date: DateTime<Utc>,
    pub trial_days_left: i64,
}
