use crate::models::answer::AnswerMap;
use crate::models::assessment::Assessment;
use crate::models::question::{Question, QuestionKind};
use crate::models::recommendation::{RecommendationRule, UserRecommendation};
use crate::models::response::AssessmentResponse;
use crate::utils::language::Lang;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummary {
    pub id: Uuid,
    pub module_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub show_results: bool,
}

impl AssessmentSummary {
    pub fn from_model(assessment: &Assessment, lang: Lang) -> Self {
        Self {
            id: assessment.id,
            module_id: assessment.module_id,
            title: lang.pick(&assessment.title_en, &assessment.title_es).to_string(),
            description: lang.pick_opt(&assessment.description_en, &assessment.description_es),
            passing_score: assessment.passing_score,
            show_results: assessment.show_results,
        }
    }
}

/// Learner-facing question view. Never carries the canonical correct
/// answer.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Option<JsonValue>,
    pub points: i32,
    pub position: i32,
}

impl QuestionView {
    pub fn from_model(question: &Question, lang: Lang) -> Self {
        Self {
            id: question.id,
            kind: question.kind,
            prompt: lang.pick(&question.prompt_en, &question.prompt_es).to_string(),
            options: question.options.clone(),
            points: question.points,
            position: question.position,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentDetail {
    #[serde(flatten)]
    pub summary: AssessmentSummary,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAssessmentRequest {
    pub answers: AnswerMap,
    #[validate(range(min = 0))]
    pub time_spent_seconds: Option<i32>,
}

/// A matched recommendation, enriched with both display languages.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub id: Uuid,
    pub rule_id: Uuid,
    pub priority: i32,
    pub title_en: String,
    pub title_es: String,
    pub body_en: String,
    pub body_es: String,
}

impl RecommendationView {
    pub fn from_match(rule: &RecommendationRule, grant: &UserRecommendation) -> Self {
        Self {
            id: grant.id,
            rule_id: rule.id,
            priority: rule.priority,
            title_en: rule.title_en.clone(),
            title_es: rule.title_es.clone(),
            body_en: rule.body_en.clone(),
            body_es: rule.body_es.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAssessmentResponse {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub score: i32,
    pub max_possible_score: i32,
    pub percentage_score: i32,
    pub passed: bool,
    pub time_spent_seconds: Option<i32>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub recommendations: Vec<RecommendationView>,
    pub earned_milestones: Vec<crate::dto::curriculum_dto::MilestoneView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseSummary {
    pub id: Uuid,
    pub score: i32,
    pub max_possible_score: i32,
    pub percentage_score: i32,
    pub passed: bool,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl ResponseSummary {
    pub fn from_model(response: &AssessmentResponse) -> Self {
        Self {
            id: response.id,
            score: response.score,
            max_possible_score: response.max_possible_score,
            percentage_score: response.percentage_score,
            passed: response.passed,
            completed_at: response.completed_at,
        }
    }
}
