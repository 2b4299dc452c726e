pub mod auth;
pub mod billing;
pub mod feedback;
pub mod info;
pub mod messages;
pub mod reddit;
pub mod validate;
pub mod waitlist;

use validationly_errors::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
