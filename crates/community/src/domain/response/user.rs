use crate::{
    domain::response::AdminResponse,
    model::{Gender, SocialLinks, User, UserStatus},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
    pub education: Option<String>,
    pub social_links: SocialLinks,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.id,
            name: value.name,
            email: value.email,
            age: value.age,
            gender: value.gender,
            department: value.department,
            education: value.education,
            social_links: value.social_links,
            status: value.status,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Whoever the session token belongs to.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(tag = "role", content = "profile", rename_all = "lowercase")]
pub enum ProfileResponse {
    User(UserResponse),
    Admin(AdminResponse),
}
