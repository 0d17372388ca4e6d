use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: Uuid,
    pub module_id: Option<Uuid>,
    pub title_en: String,
    pub title_es: String,
    pub description_en: Option<String>,
    pub description_es: Option<String>,
    pub passing_score: i32,
    pub show_results: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
