use crate::models::question::QuestionKind;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModulePayload {
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub title_es: String,
    pub summary_en: Option<String>,
    pub summary_es: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateModulePayload {
    #[validate(length(min = 1))]
    pub title_en: Option<String>,
    #[validate(length(min = 1))]
    pub title_es: Option<String>,
    pub summary_en: Option<String>,
    pub summary_es: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLessonPayload {
    pub module_id: Uuid,
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub title_es: String,
    pub content_en: Option<String>,
    pub content_es: Option<String>,
    #[validate(range(min = 1))]
    pub estimated_minutes: Option<i32>,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLessonPayload {
    #[validate(length(min = 1))]
    pub title_en: Option<String>,
    #[validate(length(min = 1))]
    pub title_es: Option<String>,
    pub content_en: Option<String>,
    pub content_es: Option<String>,
    #[validate(range(min = 1))]
    pub estimated_minutes: Option<i32>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssessmentPayload {
    pub module_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub title_es: String,
    pub description_en: Option<String>,
    pub description_es: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
    pub show_results: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAssessmentPayload {
    pub module_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub title_en: Option<String>,
    #[validate(length(min = 1))]
    pub title_es: Option<String>,
    pub description_en: Option<String>,
    pub description_es: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i32>,
    pub show_results: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionPayload {
    pub kind: QuestionKind,
    #[validate(length(min = 1))]
    pub prompt_en: String,
    #[validate(length(min = 1))]
    pub prompt_es: String,
    pub options: Option<JsonValue>,
    #[validate(range(min = 0, max = 1000))]
    pub points: Option<i32>,
    pub correct_answer: Option<JsonValue>,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionPayload {
    pub kind: Option<QuestionKind>,
    #[validate(length(min = 1))]
    pub prompt_en: Option<String>,
    #[validate(length(min = 1))]
    pub prompt_es: Option<String>,
    pub options: Option<JsonValue>,
    #[validate(range(min = 0, max = 1000))]
    pub points: Option<i32>,
    pub correct_answer: Option<JsonValue>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRulePayload {
    #[validate(length(min = 1, max = 40))]
    pub condition_type: String,
    pub condition: Option<JsonValue>,
    pub priority: Option<i32>,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub title_es: String,
    #[validate(length(min = 1))]
    pub body_en: String,
    #[validate(length(min = 1))]
    pub body_es: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRulePayload {
    #[validate(length(min = 1, max = 40))]
    pub condition_type: Option<String>,
    pub condition: Option<JsonValue>,
    pub priority: Option<i32>,
    #[validate(length(min = 1))]
    pub title_en: Option<String>,
    #[validate(length(min = 1))]
    pub title_es: Option<String>,
    #[validate(length(min = 1))]
    pub body_en: Option<String>,
    #[validate(length(min = 1))]
    pub body_es: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseFilterQuery {
    pub assessment_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub passed: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
