use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{Plan, PlanDetail, User};
use super::store::{PlanStore, Store, UserStore, PLAN_DETAIL_EXISTS, PLAN_NOT_FOUND};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    plans: Vec<Plan>,
    /// Insertion order is list order
    details: Vec<PlanDetail>,
    next_user_id: i64,
    next_plan_id: i64,
}

impl Tables {
    fn owns_plan(&self, user_id: i64, plan_id: i64) -> Result<(), DatabaseError> {
        if self.plans.iter().any(|p| p.id == plan_id && p.user_id == user_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(PLAN_NOT_FOUND.to_string()))
        }
    }
}

/// In-process store with the same constraints as the PostgreSQL schema:
/// unique usernames, unique `(plan_id, move)`, cascade delete of details.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::Conflict("Username already exists".to_string()));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user);
        Ok(tables.next_user_id)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn create_plan(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_plan_id += 1;
        let plan = Plan {
            id: tables.next_plan_id,
            user_id,
            created_at: Utc::now(),
        };
        tables.plans.push(plan);
        Ok(tables.next_plan_id)
    }

    async fn list_plans(&self, user_id: i64) -> Result<Vec<Plan>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.plans.iter().filter(|p| p.user_id == user_id).cloned().collect())
    }

    async fn find_plan(&self, user_id: i64, plan_id: i64) -> Result<Option<Plan>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .plans
            .iter()
            .find(|p| p.id == plan_id && p.user_id == user_id)
            .cloned())
    }

    async fn delete_plan(&self, user_id: i64, plan_id: i64) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.plans.len();
        tables.plans.retain(|p| !(p.id == plan_id && p.user_id == user_id));
        let removed = (before - tables.plans.len()) as u64;

        if removed > 0 {
            tables.details.retain(|d| d.plan_id != plan_id);
        }
        Ok(removed)
    }

    async fn add_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.owns_plan(user_id, plan_id)?;

        if tables
            .details
            .iter()
            .any(|d| d.plan_id == plan_id && d.move_name == move_name)
        {
            return Err(DatabaseError::Conflict(PLAN_DETAIL_EXISTS.to_string()));
        }

        tables.details.push(PlanDetail {
            plan_id,
            move_name: move_name.to_string(),
            num_of_reps,
        });
        Ok(())
    }

    async fn list_details(&self, user_id: i64, plan_id: i64) -> Result<Vec<PlanDetail>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.owns_plan(user_id, plan_id)?;
        Ok(tables
            .details
            .iter()
            .filter(|d| d.plan_id == plan_id)
            .cloned()
            .collect())
    }

    async fn update_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.owns_plan(user_id, plan_id)?;

        let mut updated = 0;
        for detail in tables
            .details
            .iter_mut()
            .filter(|d| d.plan_id == plan_id && d.move_name == move_name)
        {
            detail.num_of_reps = num_of_reps;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_detail(&self, user_id: i64, plan_id: i64, move_name: &str) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.owns_plan(user_id, plan_id)?;

        let before = tables.details.len();
        tables
            .details
            .retain(|d| !(d.plan_id == plan_id && d.move_name == move_name));
        Ok((before - tables.details.len()) as u64)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
