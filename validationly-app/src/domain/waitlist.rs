use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WAITLIST_CAP: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub lp_id: String,
    pub email: String,
    pub ts: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn list_key(lp_id: &str) -> String {
        format!("wl:{}", lp_id)
    }
}
