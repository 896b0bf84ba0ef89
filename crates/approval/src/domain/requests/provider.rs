use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the provider's admin "create user" call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthUser {
    pub email: String,
    pub password: String,
    pub email_confirm: bool,
    pub user_metadata: Map<String, Value>,
}
