use crate::error::{Error, Result};
use crate::models::answer::AnswerMap;
use crate::models::assessment::Assessment;
use crate::models::question::Question;
use crate::models::recommendation::{RecommendationRule, UserRecommendation};
use crate::models::response::AssessmentResponse;
use crate::services::recommendation_service::RecommendationService;
use crate::services::scoring_service::ScoringService;
use sqlx::PgPool;
use uuid::Uuid;

/// Outcome of one submission: the persisted response plus the matched
/// recommendation rules paired with their grant records, in priority
/// order.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub response: AssessmentResponse,
    pub recommendations: Vec<(RecommendationRule, UserRecommendation)>,
}

#[derive(Clone)]
pub struct AssessmentService {
    pool: PgPool,
}

impl AssessmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<Assessment>> {
        let assessments = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT * FROM assessments
            WHERE is_active = TRUE
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(assessments)
    }

    /// Fetch an assessment a learner may take. Missing or inactive
    /// rows both surface as not-found.
    pub async fn get_active(&self, assessment_id: Uuid) -> Result<Assessment> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"SELECT * FROM assessments WHERE id = $1 AND is_active = TRUE"#,
        )
        .bind(assessment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))?;
        Ok(assessment)
    }

    pub async fn active_questions(&self, assessment_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT * FROM questions
            WHERE assessment_id = $1 AND is_active = TRUE
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// Score a submission, persist the response row, then evaluate the
    /// assessment's recommendation rules and persist one grant per
    /// match. The response write and the grant writes are deliberately
    /// not wrapped in a transaction: recommendations are best-effort
    /// enrichment, and a response without grants is acceptable.
    pub async fn submit(
        &self,
        user_id: Uuid,
        assessment_id: Uuid,
        answers: &AnswerMap,
        time_spent_seconds: Option<i32>,
    ) -> Result<SubmissionOutcome> {
        let assessment = self.get_active(assessment_id).await?;
        let questions = self.active_questions(assessment_id).await?;

        let summary = ScoringService::score_submission(&questions, answers);
        let percentage = summary.percentage();
        let passed = percentage >= assessment.passing_score;

        let answers_json = serde_json::to_value(answers)?;
        let response = sqlx::query_as::<_, AssessmentResponse>(
            r#"
            INSERT INTO assessment_responses (
                assessment_id, user_id, score, max_possible_score,
                percentage_score, passed, time_spent_seconds, answers
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(assessment_id)
        .bind(user_id)
        .bind(summary.score)
        .bind(summary.max_possible)
        .bind(percentage)
        .bind(passed)
        .bind(time_spent_seconds)
        .bind(answers_json)
        .fetch_one(&self.pool)
        .await?;

        let recommendation_service = RecommendationService::new(self.pool.clone());
        let rules = recommendation_service.active_rules(assessment_id).await?;
        let applicable = RecommendationService::select_applicable(&rules, percentage, answers);

        let mut recommendations = Vec::with_capacity(applicable.len());
        for rule in applicable {
            let grant = recommendation_service
                .grant(user_id, response.id, rule.id)
                .await?;
            recommendations.push((rule.clone(), grant));
        }

        tracing::info!(
            response_id = %response.id,
            assessment_id = %assessment_id,
            score = summary.score,
            max_possible = summary.max_possible,
            percentage,
            passed,
            matched_rules = recommendations.len(),
            "assessment submission scored"
        );

        Ok(SubmissionOutcome {
            response,
            recommendations,
        })
    }

    pub async fn responses_for_user(
        &self,
        user_id: Uuid,
        assessment_id: Uuid,
    ) -> Result<Vec<AssessmentResponse>> {
        let responses = sqlx::query_as::<_, AssessmentResponse>(
            r#"
            SELECT * FROM assessment_responses
            WHERE user_id = $1 AND assessment_id = $2
            ORDER BY completed_at DESC
            "#,
        )
        .bind(user_id)
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(responses)
    }
}
