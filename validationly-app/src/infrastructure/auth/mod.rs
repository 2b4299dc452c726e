mod jwt;

pub use jwt::TokenService;
