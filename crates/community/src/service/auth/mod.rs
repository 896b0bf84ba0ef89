mod identity;
mod login;
mod register;
mod token;

pub use self::identity::{IdentityService, IdentityServiceDeps};
pub use self::login::{LoginService, LoginServiceDeps, MAX_LOGIN_ATTEMPTS};
pub use self::register::{RegisterService, RegisterServiceDeps};
pub use self::token::TokenService;
