use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One exercise entry of a plan, keyed by `(plan_id, move)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PlanDetail {
    pub plan_id: i64,
    #[serde(rename = "move")]
    #[sqlx(rename = "move")]
    pub move_name: String,
    pub num_of_reps: i32,
}
