use crate::model::Admin;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<Admin> for AdminResponse {
    fn from(value: Admin) -> Self {
        AdminResponse {
            id: value.id,
            email: value.email,
            name: value.name,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}
