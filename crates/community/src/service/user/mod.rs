mod approval;
mod profile;
mod query;
mod stats;

pub use self::approval::{ApprovalService, ApprovalServiceDeps};
pub use self::profile::{ProfileService, ProfileServiceDeps};
pub use self::query::UserQueryService;
pub use self::stats::StatsService;
