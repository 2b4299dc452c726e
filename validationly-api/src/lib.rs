pub mod extract;
pub mod handlers;
pub mod response;
pub mod route;

pub use route::create_app;
