mod password;
mod route_guards;
mod tokens;

pub use password::{hash_password, verify_password};
pub use route_guards::protect_route;
pub use tokens::{create_token_pair, decode_token, TokenKind, TokenPair};
