pub mod claims;
pub mod context;
pub mod gate;
pub mod jwt;

pub use claims::{Claims, Identity, Role, ADMIN_ROLE};
pub use context::AuthContext;
pub use jwt::{TokenCodec, TokenError, TOKEN_TTL};
