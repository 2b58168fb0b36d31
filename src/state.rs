use std::sync::Arc;

use crate::auth::{JwtError, JwtManager};
use crate::config::AppConfig;
use crate::database::Store;
use crate::services::{PlanDetailService, PlanService, UserService};

/// Everything a request handler can reach, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtManager>,
    pub store: Arc<dyn Store>,
    pub users: Arc<UserService>,
    pub plans: Arc<PlanService>,
    pub plan_details: Arc<PlanDetailService>,
}

impl AppState {
    pub fn new<S>(config: AppConfig, store: S) -> Result<Self, JwtError>
    where
        S: Store + 'static,
    {
        let store = Arc::new(store);
        let jwt = Arc::new(JwtManager::new(&config.security)?);

        Ok(Self {
            users: Arc::new(UserService::new(
                store.clone(),
                jwt.clone(),
                config.security.bcrypt_cost,
            )),
            plans: Arc::new(PlanService::new(store.clone())),
            plan_details: Arc::new(PlanDetailService::new(store.clone())),
            config: Arc::new(config),
            jwt,
            store,
        })
    }
}
