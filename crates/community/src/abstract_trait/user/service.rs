use crate::domain::{
    requests::{ChangePasswordRequest, FindAllUsers, UpdateProfileRequest},
    response::{DashboardStatsResponse, UserResponse},
};
use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, ApiResponsePagination},
    errors::ServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

pub type DynUserQueryService = Arc<dyn UserQueryServiceTrait + Send + Sync>;
pub type DynProfileService = Arc<dyn ProfileServiceTrait + Send + Sync>;
pub type DynApprovalService = Arc<dyn ApprovalServiceTrait + Send + Sync>;
pub type DynStatsService = Arc<dyn StatsServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError>;
    /// Signup requests still awaiting a decision.
    async fn find_pending(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError>;
}

#[async_trait]
pub trait ProfileServiceTrait {
    async fn update_profile(
        &self,
        user_id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn change_password(
        &self,
        user_id: Uuid,
        req: &ChangePasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError>;
}

#[async_trait]
pub trait ApprovalServiceTrait {
    async fn approve_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn reject_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn suspend_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn reinstate_user(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn delete_user(&self, id: Uuid) -> Result<ApiResponse<bool>, ServiceError>;
}

#[async_trait]
pub trait StatsServiceTrait {
    async fn dashboard_stats(&self) -> Result<ApiResponse<DashboardStatsResponse>, ServiceError>;
}
