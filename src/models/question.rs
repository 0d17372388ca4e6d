use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Fixed ceiling of the Likert scale used across all assessments.
pub const LIKERT_MAX: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "question_kind", rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    LikertScale,
    Rating,
    ShortText,
    LongText,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub kind: QuestionKind,
    pub prompt_en: String,
    pub prompt_es: String,
    pub options: Option<JsonValue>,
    pub points: i32,
    pub correct_answer: Option<JsonValue>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
