use crate::{
    abstract_trait::user::{DynUserQueryRepository, StatsServiceTrait},
    domain::response::DashboardStatsResponse,
    model::UserStatus,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};

#[derive(Clone)]
pub struct StatsService {
    query: DynUserQueryRepository,
    metrics: Metrics,
}

impl StatsService {
    pub fn new(query: DynUserQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "stats_service");

        Self { query, metrics }
    }
}

#[async_trait]
impl StatsServiceTrait for StatsService {
    async fn dashboard_stats(&self) -> Result<ApiResponse<DashboardStatsResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start("admin", "DashboardStats");

        let counts = match self.query.count_by_status().await {
            Ok(c) => c,
            Err(e) => {
                tracing_ctx.complete_error(&self.metrics, Method::Get, "Failed to count users");
                return Err(e.into());
            }
        };

        let count = |status: UserStatus| counts.get(&status).copied().unwrap_or(0);

        let stats = DashboardStatsResponse {
            total: counts.values().sum(),
            pending: count(UserStatus::Pending),
            approved: count(UserStatus::Approved),
            rejected: count(UserStatus::Rejected),
            suspended: count(UserStatus::Suspended),
        };

        tracing_ctx.complete_success(&self.metrics, Method::Get, "Dashboard stats computed");

        Ok(ApiResponse::success("Dashboard stats", stats))
    }
}
