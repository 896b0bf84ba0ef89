mod env;
mod hashing;
mod jwt;

pub use self::env::{optional, parse_bool, required};
pub use self::hashing::Hashing;
pub use self::jwt::{Claims, JwtConfig};
