mod approval;

pub use self::approval::{ApprovalService, TEMPORARY_PASSWORD_LENGTH};
