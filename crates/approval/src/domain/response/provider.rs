use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Row of the signup requests table. Profile columns are kept as-is and
/// forwarded as user metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRecord {
    pub id: Value,
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedAuthUser {
    pub id: String,
    pub email: String,
}
