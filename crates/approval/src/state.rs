use crate::{
    abstract_trait::{DynApprovalService, DynAuthProvider},
    config::Config,
    provider::ProviderClient,
    service::ApprovalService,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::utils::SystemMetrics;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub approval_service: DynApprovalService,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("approval_service", &"DynApprovalService")
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let provider = ProviderClient::new(config.provider.clone())
            .context("Failed to build auth provider client")?;

        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: DynAuthProvider) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let approval_service =
            Arc::new(ApprovalService::new(provider, &mut registry)) as DynApprovalService;

        system_metrics.register(&mut registry);

        Self {
            approval_service,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        }
    }
}
