mod feedback;
mod locale;
mod pain;
mod user;
mod validation;
mod waitlist;

pub use feedback::{FeedbackItem, FEEDBACK_LIST_CAP};
pub use locale::{DiacriticDetector, Locale, LocaleDetector};
pub use pain::{
    DocumentQuery, IdeaFilter, PainAnalysis, PainDocument, PainExample, PainIdea, PainInsights,
    PainMetrics,
};
pub use user::{Plan, TrialUser, UserClaims, UserRecord};
pub use validation::{Platform, PlatformAnalysis, ValidationResult, MAX_IDEA_CHARS};
pub use waitlist::{WaitlistEntry, WAITLIST_CAP};
