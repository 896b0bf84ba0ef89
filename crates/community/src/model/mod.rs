mod admin;
mod role;
mod user;

pub use self::admin::Admin;
pub use self::role::Role;
pub use self::user::{Gender, SocialLinks, User, UserStatus};
