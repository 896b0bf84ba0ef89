mod provider;
mod service;

pub use self::provider::{AuthProviderTrait, DynAuthProvider};
pub use self::service::{ApprovalServiceTrait, DynApprovalService};
