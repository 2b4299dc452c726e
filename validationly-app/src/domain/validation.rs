use super::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_IDEA_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Reddit,
    Linkedin,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Reddit, Platform::Linkedin];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Reddit => "reddit",
            Self::Linkedin => "linkedin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Reddit => "Reddit",
            Self::Linkedin => "LinkedIn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalysis {
    pub platform_name: String,
    pub score: u8,
    pub summary: String,
    pub key_findings: Vec<String>,
    pub content_suggestion: String,
}

impl PlatformAnalysis {
    pub const MAX_SCORE: u8 = 5;
}

/// Report returned by the validate endpoint. Every platform in
/// [`Platform::ALL`] has an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub idea: String,
    pub demand_score: u8,
    pub score_justification: String,
    pub platform_analyses: BTreeMap<Platform, PlatformAnalysis>,
    pub tweet_suggestion: String,
    pub reddit_title_suggestion: String,
    pub reddit_body_suggestion: String,
    pub linkedin_suggestion: String,
    pub language: Locale,
}

impl ValidationResult {
    pub const MAX_DEMAND_SCORE: u8 = 100;
}
