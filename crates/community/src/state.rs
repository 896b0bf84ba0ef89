use crate::{
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    model::Admin,
    repository::MemoryStore,
};
use anyhow::{Context, Result};
use chrono::Utc;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Hashing, JwtConfig},
    utils::SystemMetrics,
};
use std::{fmt, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    /// Wires the in-memory store, services and metrics, then seeds the
    /// configured admin account.
    pub async fn new(config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::with_cost(config.bcrypt_cost)) as DynHashing;
        let store = Arc::new(MemoryStore::new(Duration::from_millis(
            config.simulated_latency_ms,
        )));
        let system_metrics = Arc::new(SystemMetrics::new());

        let mut registry = Registry::default();

        let deps = DependenciesInjectDeps {
            store,
            hash: hashing.clone(),
            jwt_config: jwt_config.clone(),
        };

        let di_container = DependenciesInject::new(deps, &mut registry);

        registry.register_metrics(&system_metrics);

        let admin_hash = hashing
            .hash_password(&config.admin.password)
            .await
            .context("Failed to hash admin password")?;

        let admin = di_container
            .admin_repository
            .seed(Admin {
                id: Uuid::new_v4(),
                email: config.admin.email.clone(),
                name: config.admin.name.clone(),
                password: admin_hash,
                created_at: Utc::now(),
            })
            .await
            .context("Failed to seed admin account")?;

        info!("👑 Admin account ready: {}", admin.email);

        Ok(Self {
            jwt_config,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        })
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
