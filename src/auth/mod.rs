pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::AuthUser;
pub use jwt::TokenIssuer;
pub use password::PasswordHasher;
