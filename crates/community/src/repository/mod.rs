mod admin;
mod store;
mod user;

pub use self::admin::AdminRepository;
pub use self::store::{MemoryStore, normalize_email};
pub use self::user::UserRepository;
