use std::sync::Arc;
use tracing::info;

use crate::database::models::PlanDetail;
use crate::database::store::PLAN_NOT_FOUND;
use crate::database::PlanStore;

use super::error::ServiceError;

pub const PLAN_DETAIL_NOT_FOUND: &str = "Plan detail not found";

/// Exercise entries of a plan. A plan the caller does not own is "Plan not found"
/// before the entry itself is looked at; the store repeats the check atomically
/// with each write.
pub struct PlanDetailService {
    store: Arc<dyn PlanStore>,
}

impl PlanDetailService {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    /// Fail with "Plan not found" unless `user_id` owns `plan_id`
    pub async fn require_owned_plan(&self, user_id: i64, plan_id: i64) -> Result<(), ServiceError> {
        self.store
            .find_plan(user_id, plan_id)
            .await
            .map_err(ServiceError::store("Error fetching plan"))?
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(PLAN_NOT_FOUND.to_string()))
    }

    pub async fn add_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<(), ServiceError> {
        self.require_owned_plan(user_id, plan_id).await?;
        validate_entry(move_name, num_of_reps)?;

        self.store
            .add_detail(user_id, plan_id, move_name, num_of_reps)
            .await
            .map_err(ServiceError::store("Error adding plan detail"))?;

        info!("User {} added {} x{} to plan {}", user_id, move_name, num_of_reps, plan_id);
        Ok(())
    }

    pub async fn list_details(&self, user_id: i64, plan_id: i64) -> Result<Vec<PlanDetail>, ServiceError> {
        self.store
            .list_details(user_id, plan_id)
            .await
            .map_err(ServiceError::store("Error fetching plan details"))
    }

    pub async fn update_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<(), ServiceError> {
        self.require_owned_plan(user_id, plan_id).await?;
        validate_entry(move_name, num_of_reps)?;

        let updated = self
            .store
            .update_detail(user_id, plan_id, move_name, num_of_reps)
            .await
            .map_err(ServiceError::store("Error updating plan detail"))?;

        if updated == 0 {
            return Err(ServiceError::NotFound(PLAN_DETAIL_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    pub async fn delete_detail(&self, user_id: i64, plan_id: i64, move_name: &str) -> Result<(), ServiceError> {
        let deleted = self
            .store
            .delete_detail(user_id, plan_id, move_name)
            .await
            .map_err(ServiceError::store("Error deleting plan detail"))?;

        if deleted == 0 {
            return Err(ServiceError::NotFound(PLAN_DETAIL_NOT_FOUND.to_string()));
        }

        info!("User {} removed {} from plan {}", user_id, move_name, plan_id);
        Ok(())
    }
}

fn validate_entry(move_name: &str, num_of_reps: i32) -> Result<(), ServiceError> {
    if move_name.trim().is_empty() || num_of_reps < 0 {
        return Err(ServiceError::Validation("Invalid request body".to_string()));
    }
    Ok(())
}
