pub mod idea;
pub mod reddit_document;
pub mod signal;
pub mod user;
pub mod validation_run;
pub mod validation_score;

pub use idea::Entity as Idea;
pub use reddit_document::Entity as RedditDocument;
pub use signal::Entity as Signal;
pub use user::Entity as User;
pub use validation_run::Entity as ValidationRun;
pub use validation_score::Entity as ValidationScore;
