use crate::model::{Admin, User};
use std::{collections::HashMap, time::Duration};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local tables standing in for a database. Every repository call
/// first waits `latency`, mimicking a network round trip.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: RwLock<HashMap<Uuid, User>>,
    pub admins: RwLock<HashMap<Uuid, Admin>>,
    latency: Duration,
}

impl MemoryStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            admins: RwLock::new(HashMap::new()),
            latency,
        }
    }

    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
