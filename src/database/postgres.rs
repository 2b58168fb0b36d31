use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::manager::DatabaseError;
use super::models::{Plan, PlanDetail, User};
use super::store::{PlanStore, Store, UserStore, PLAN_DETAIL_EXISTS, PLAN_NOT_FOUND};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the plan row for the rest of the transaction if the user owns it.
    /// FOR SHARE keeps a concurrent plan delete from slipping in before the detail write.
    async fn lock_owned_plan(
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
        plan_id: i64,
    ) -> Result<(), DatabaseError> {
        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM plans WHERE id = $1 AND user_id = $2 FOR SHARE")
                .bind(plan_id)
                .bind(user_id)
                .fetch_optional(&mut **tx)
                .await?;

        match owned {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(PLAN_NOT_FOUND.to_string())),
        }
    }
}

fn conflict_on_unique(err: sqlx::Error, message: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DatabaseError::Conflict(message.to_string())
        }
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, DatabaseError> {
        sqlx::query_scalar("INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id")
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "Username already exists"))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at, updated_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl PlanStore for PgStore {
    async fn create_plan(&self, user_id: i64) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar("INSERT INTO plans (user_id) VALUES ($1) RETURNING id")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_plans(&self, user_id: i64) -> Result<Vec<Plan>, DatabaseError> {
        let plans = sqlx::query_as::<_, Plan>(
            "SELECT id, user_id, created_at FROM plans WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(plans)
    }

    async fn find_plan(&self, user_id: i64, plan_id: i64) -> Result<Option<Plan>, DatabaseError> {
        let plan = sqlx::query_as::<_, Plan>(
            "SELECT id, user_id, created_at FROM plans WHERE id = $1 AND user_id = $2",
        )
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(plan)
    }

    async fn delete_plan(&self, user_id: i64, plan_id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1 AND user_id = $2")
            .bind(plan_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn add_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_owned_plan(&mut tx, user_id, plan_id).await?;

        sqlx::query("INSERT INTO plan_details (plan_id, move, num_of_reps) VALUES ($1, $2, $3)")
            .bind(plan_id)
            .bind(move_name)
            .bind(num_of_reps)
            .execute(&mut *tx)
            .await
            .map_err(|e| conflict_on_unique(e, PLAN_DETAIL_EXISTS))?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_details(&self, user_id: i64, plan_id: i64) -> Result<Vec<PlanDetail>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_owned_plan(&mut tx, user_id, plan_id).await?;

        let details = sqlx::query_as::<_, PlanDetail>(
            "SELECT plan_id, move, num_of_reps FROM plan_details WHERE plan_id = $1 ORDER BY id",
        )
        .bind(plan_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(details)
    }

    async fn update_detail(
        &self,
        user_id: i64,
        plan_id: i64,
        move_name: &str,
        num_of_reps: i32,
    ) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_owned_plan(&mut tx, user_id, plan_id).await?;

        let result = sqlx::query("UPDATE plan_details SET num_of_reps = $1 WHERE plan_id = $2 AND move = $3")
            .bind(num_of_reps)
            .bind(plan_id)
            .bind(move_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn delete_detail(&self, user_id: i64, plan_id: i64, move_name: &str) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        Self::lock_owned_plan(&mut tx, user_id, plan_id).await?;

        let result = sqlx::query("DELETE FROM plan_details WHERE plan_id = $1 AND move = $2")
            .bind(plan_id)
            .bind(move_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
