use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FEEDBACK_LIST_CAP: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackItem {
    pub const MIN_MESSAGE_CHARS: usize = 3;
    pub const MAX_MESSAGE_CHARS: usize = 1000;
    pub const MAX_CONTACT_CHARS: usize = 200;
    pub const MAX_SCORE: u8 = 10;
}
