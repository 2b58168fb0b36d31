use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
