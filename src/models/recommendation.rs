use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRule {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub condition_type: String,
    pub condition: JsonValue,
    pub priority: i32,
    pub title_en: String,
    pub title_es: String,
    pub body_en: String,
    pub body_es: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join record linking a learner, a response, and a matched rule.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub response_id: Uuid,
    pub rule_id: Uuid,
    pub created_at: DateTime<Utc>,
}
