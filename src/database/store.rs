use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Plan, PlanDetail, User};

pub const PLAN_NOT_FOUND: &str = "Plan not found";
pub const PLAN_DETAIL_EXISTS: &str = "Plan detail already exists";

/// Credential storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return its id. A taken username is a `DatabaseError::Conflict`.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, DatabaseError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;
}

/// Plan and plan detail storage. Every method is scoped to the owning user.
///
/// The detail methods check that `plan_id` belongs to `user_id` atomically with
/// the statement that follows, and fail with `DatabaseError::NotFound("Plan not found")`
/// when it does not. The methods that return a row count leave the zero case to the caller.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn create_plan(&self, user_id: i64) -> Result<i64, DatabaseError>;

    async fn list_plans(&self, user_id: i64) -> Result<Vec<Plan>, DatabaseError>;

    async fn find_plan(&self, user_id: i64, plan_id: i64) -> Result<Option<Plan>, DatabaseError>;

    /// Deletes the plan and, by cascade, its details. Returns rows affected.
    async fn delete_plan(&self, user_id: i64, plan_id: i64) -> Result<u64, DatabaseError>;

    /// A duplicate `(plan_id, move)` is a `DatabaseError::Conflict`.
    async fn add_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<(), DatabaseError>;

    /// Details in insertion order
    async fn list_details(&self, user_id: i64, plan_id: i64) -> Result<Vec<PlanDetail>, DatabaseError>;

    async fn update_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<u64, DatabaseError>;

    async fn delete_detail(&self, user_id: i64, plan_id: i64, move_name: &str) -> Result<u64, DatabaseError>;
}

/// Everything the application needs from its backing store
#[async_trait]
pub trait Store: UserStore + PlanStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
