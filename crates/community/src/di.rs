use crate::{
    abstract_trait::{
        admin::DynAdminRepository,
        auth::{DynIdentityService, DynLoginService, DynRegisterService},
        user::{DynApprovalService, DynProfileService, DynStatsService, DynUserQueryService},
    },
    cache::CacheStore,
    repository::{AdminRepository, MemoryStore, UserRepository},
    service::{
        auth::{
            IdentityService, IdentityServiceDeps, LoginService, LoginServiceDeps,
            RegisterService, RegisterServiceDeps, TokenService,
        },
        user::{
            ApprovalService, ApprovalServiceDeps, ProfileService, ProfileServiceDeps,
            StatsService, UserQueryService,
        },
    },
};
use prometheus_client::registry::Registry;
use shared::abstract_trait::{DynHashing, DynJwtService};
use std::{fmt, sync::Arc, time::Duration};

const CACHE_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct DependenciesInject {
    pub register_service: DynRegisterService,
    pub login_service: DynLoginService,
    pub identity_service: DynIdentityService,
    pub user_query_service: DynUserQueryService,
    pub profile_service: DynProfileService,
    pub approval_service: DynApprovalService,
    pub stats_service: DynStatsService,
    pub admin_repository: DynAdminRepository,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("register_service", &"DynRegisterService")
            .field("login_service", &"DynLoginService")
            .field("identity_service", &"DynIdentityService")
            .field("user_query_service", &"DynUserQueryService")
            .field("profile_service", &"DynProfileService")
            .field("approval_service", &"DynApprovalService")
            .field("stats_service", &"DynStatsService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub store: Arc<MemoryStore>,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            store,
            hash,
            jwt_config,
        } = deps;

        let cache = Arc::new(CacheStore::new());
        CacheStore::spawn_cleanup(&cache, CACHE_CLEANUP_INTERVAL);

        let users = UserRepository::new(store.clone());
        let admin_repository = Arc::new(AdminRepository::new(store)) as DynAdminRepository;

        let token_service = TokenService::new(jwt_config.clone());

        let register_deps = RegisterServiceDeps {
            hash: hash.clone(),
            command: users.command.clone(),
        };
        let register_service =
            Arc::new(RegisterService::new(register_deps, registry)) as DynRegisterService;

        let login_deps = LoginServiceDeps {
            hash: hash.clone(),
            user_query: users.query.clone(),
            admins: admin_repository.clone(),
            token_service: token_service.clone(),
            cache_store: cache,
        };
        let login_service = Arc::new(LoginService::new(login_deps, registry)) as DynLoginService;

        let identity_deps = IdentityServiceDeps {
            jwt: jwt_config,
            token_service,
            user_query: users.query.clone(),
            admins: admin_repository.clone(),
        };
        let identity_service =
            Arc::new(IdentityService::new(identity_deps, registry)) as DynIdentityService;

        let user_query_service = Arc::new(UserQueryService::new(users.query.clone(), registry))
            as DynUserQueryService;

        let profile_deps = ProfileServiceDeps {
            hash,
            query: users.query.clone(),
            command: users.command.clone(),
        };
        let profile_service =
            Arc::new(ProfileService::new(profile_deps, registry)) as DynProfileService;

        let approval_deps = ApprovalServiceDeps {
            query: users.query.clone(),
            command: users.command.clone(),
        };
        let approval_service =
            Arc::new(ApprovalService::new(approval_deps, registry)) as DynApprovalService;

        let stats_service =
            Arc::new(StatsService::new(users.query, registry)) as DynStatsService;

        Self {
            register_service,
            login_service,
            identity_service,
            user_query_service,
            profile_service,
            approval_service,
            stats_service,
            admin_repository,
        }
    }
}
