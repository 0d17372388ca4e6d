use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted record per submission attempt. Written once at submit
/// time and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub max_possible_score: i32,
    pub percentage_score: i32,
    pub passed: bool,
    pub time_spent_seconds: Option<i32>,
    pub answers: JsonValue,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
