mod admin;
mod stats;
mod token;
mod user;

pub use self::admin::AdminResponse;
pub use self::stats::DashboardStatsResponse;
pub use self::token::TokenResponse;
pub use self::user::{ProfileResponse, UserResponse};
