use crate::{
    abstract_trait::user::UserQueryRepositoryTrait,
    domain::requests::FindAllUsers,
    model::{User as UserModel, UserStatus},
    repository::{MemoryStore, store::normalize_email},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

pub struct UserQueryRepository {
    db: Arc<MemoryStore>,
}

impl UserQueryRepository {
    pub fn new(db: Arc<MemoryStore>) -> Self {
        Self { db }
    }
}

fn matches_search(user: &UserModel, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle)
        || user.email.contains(needle)
        || user
            .department
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        self.db.simulate_latency().await;

        let page = req.page.max(1) as usize;
        let page_size = req.page_size.max(1) as usize;
        let needle = req.search.trim().to_lowercase();

        let users = self.db.users.read().await;

        let mut matched: Vec<&UserModel> = users
            .values()
            .filter(|u| req.status.is_none_or(|status| u.status == status))
            .filter(|u| needle.is_empty() || matches_search(u, &needle))
            .collect();

        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.email.cmp(&b.email))
        });

        let total = matched.len() as i64;

        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError> {
        self.db.simulate_latency().await;

        Ok(self.db.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        self.db.simulate_latency().await;

        let email = normalize_email(email);

        Ok(self
            .db
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn count_by_status(&self) -> Result<HashMap<UserStatus, i64>, RepositoryError> {
        self.db.simulate_latency().await;

        let mut counts: HashMap<UserStatus, i64> =
            UserStatus::ALL.iter().map(|s| (*s, 0)).collect();

        for user in self.db.users.read().await.values() {
            *counts.entry(user.status).or_default() += 1;
        }

        Ok(counts)
    }
}
