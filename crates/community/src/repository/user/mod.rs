mod command;
mod query;

use self::command::UserCommandRepository;
use self::query::UserQueryRepository;

use crate::{
    abstract_trait::user::{DynUserCommandRepository, DynUserQueryRepository},
    repository::MemoryStore,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserRepository {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
}

impl UserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        let query = Arc::new(UserQueryRepository::new(store.clone())) as DynUserQueryRepository;
        let command = Arc::new(UserCommandRepository::new(store)) as DynUserCommandRepository;

        Self { query, command }
    }
}
