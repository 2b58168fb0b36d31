use std::sync::Arc;
use tracing::info;

use crate::database::models::Plan;
use crate::database::store::PLAN_NOT_FOUND;
use crate::database::PlanStore;

use super::error::ServiceError;

/// Plan CRUD, always scoped to the requesting user
pub struct PlanService {
    store: Arc<dyn PlanStore>,
}

impl PlanService {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    pub async fn create_plan(&self, user_id: i64) -> Result<i64, ServiceError> {
        let id = self
            .store
            .create_plan(user_id)
            .await
            .map_err(ServiceError::store("Error creating plan"))?;

        info!("User {} created plan {}", user_id, id);
        Ok(id)
    }

    pub async fn list_plans(&self, user_id: i64) -> Result<Vec<Plan>, ServiceError> {
        self.store
            .list_plans(user_id)
            .await
            .map_err(ServiceError::store("Error fetching plans"))
    }

    /// Plans owned by someone else are reported as missing
    pub async fn get_plan(&self, user_id: i64, plan_id: i64) -> Result<Plan, ServiceError> {
        self.store
            .find_plan(user_id, plan_id)
            .await
            .map_err(ServiceError::store("Error fetching plan"))?
            .ok_or_else(|| ServiceError::NotFound(PLAN_NOT_FOUND.to_string()))
    }

    pub async fn delete_plan(&self, user_id: i64, plan_id: i64) -> Result<(), ServiceError> {
        let deleted = self
            .store
            .delete_plan(user_id, plan_id)
            .await
            .map_err(ServiceError::store("Error deleting plan"))?;

        if deleted == 0 {
            return Err(ServiceError::NotFound(PLAN_NOT_FOUND.to_string()));
        }

        info!("User {} deleted plan {}", user_id, plan_id);
        Ok(())
    }
}
