mod approval;
mod provider;

pub use self::approval::{ApprovalResponse, ApprovedUser};
pub use self::provider::{CreatedAuthUser, SignupRecord};
