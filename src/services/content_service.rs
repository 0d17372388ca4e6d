use crate::dto::staff_dto::{
    CreateAssessmentPayload, CreateLessonPayload, CreateModulePayload, CreateQuestionPayload,
    CreateRulePayload, ResponseFilterQuery, UpdateAssessmentPayload, UpdateLessonPayload,
    UpdateModulePayload, UpdateQuestionPayload, UpdateRulePayload,
};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::curriculum::{CourseModule, Lesson};
use crate::models::question::Question;
use crate::models::recommendation::RecommendationRule;
use crate::models::response::AssessmentResponse;
use crate::services::recommendation_service::RuleCondition;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, serde::Serialize)]
pub struct PaginatedAssessments {
    pub items: Vec<Assessment>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct PaginatedResponses {
    pub items: Vec<AssessmentResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Staff-side authoring for curriculum content, assessments, questions,
/// and recommendation rules.
#[derive(Clone)]
pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_module(&self, payload: CreateModulePayload) -> Result<CourseModule> {
        let module = sqlx::query_as::<_, CourseModule>(
            r#"
            INSERT INTO course_modules (slug, title_en, title_es, summary_en, summary_es, position)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0))
            RETURNING *
            "#,
        )
        .bind(payload.slug)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.summary_en)
        .bind(payload.summary_es)
        .bind(payload.position)
        .fetch_one(&self.pool)
        .await?;
        Ok(module)
    }

    pub async fn update_module(
        &self,
        module_id: Uuid,
        payload: UpdateModulePayload,
    ) -> Result<CourseModule> {
        let module = sqlx::query_as::<_, CourseModule>(
            r#"
            UPDATE course_modules
            SET title_en = COALESCE($2, title_en),
                title_es = COALESCE($3, title_es),
                summary_en = COALESCE($4, summary_en),
                summary_es = COALESCE($5, summary_es),
                position = COALESCE($6, position),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(module_id)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.summary_en)
        .bind(payload.summary_es)
        .bind(payload.position)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Module not found".to_string()))?;
        Ok(module)
    }

    pub async fn list_modules(&self, include_inactive: bool) -> Result<Vec<CourseModule>> {
        let modules = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT * FROM course_modules
            WHERE ($1 OR is_active = TRUE)
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;
        Ok(modules)
    }

    pub async fn create_lesson(&self, payload: CreateLessonPayload) -> Result<Lesson> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            INSERT INTO lessons (
                module_id, slug, title_en, title_es, content_en, content_es,
                estimated_minutes, position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0))
            RETURNING *
            "#,
        )
        .bind(payload.module_id)
        .bind(payload.slug)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.content_en)
        .bind(payload.content_es)
        .bind(payload.estimated_minutes)
        .bind(payload.position)
        .fetch_one(&self.pool)
        .await?;
        Ok(lesson)
    }

    pub async fn update_lesson(
        &self,
        lesson_id: Uuid,
        payload: UpdateLessonPayload,
    ) -> Result<Lesson> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            UPDATE lessons
            SET title_en = COALESCE($2, title_en),
                title_es = COALESCE($3, title_es),
                content_en = COALESCE($4, content_en),
                content_es = COALESCE($5, content_es),
                estimated_minutes = COALESCE($6, estimated_minutes),
                position = COALESCE($7, position),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(lesson_id)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.content_en)
        .bind(payload.content_es)
        .bind(payload.estimated_minutes)
        .bind(payload.position)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Lesson not found".to_string()))?;
        Ok(lesson)
    }

    pub async fn lessons_for_module(&self, module_id: Uuid) -> Result<Vec<Lesson>> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT * FROM lessons
            WHERE module_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lessons)
    }

    pub async fn create_assessment(&self, payload: CreateAssessmentPayload) -> Result<Assessment> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            INSERT INTO assessments (
                module_id, title_en, title_es, description_en, description_es,
                passing_score, show_results
            )
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 70), COALESCE($7, TRUE))
            RETURNING *
            "#,
        )
        .bind(payload.module_id)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.description_en)
        .bind(payload.description_es)
        .bind(payload.passing_score)
        .bind(payload.show_results)
        .fetch_one(&self.pool)
        .await?;
        Ok(assessment)
    }

    pub async fn update_assessment(
        &self,
        assessment_id: Uuid,
        payload: UpdateAssessmentPayload,
    ) -> Result<Assessment> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            UPDATE assessments
            SET module_id = COALESCE($2, module_id),
                title_en = COALESCE($3, title_en),
                title_es = COALESCE($4, title_es),
                description_en = COALESCE($5, description_en),
                description_es = COALESCE($6, description_es),
                passing_score = COALESCE($7, passing_score),
                show_results = COALESCE($8, show_results),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(assessment_id)
        .bind(payload.module_id)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.description_en)
        .bind(payload.description_es)
        .bind(payload.passing_score)
        .bind(payload.show_results)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))?;
        Ok(assessment)
    }

    pub async fn list_assessments(&self, page: i64, limit: i64) -> Result<PaginatedAssessments> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let items = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT * FROM assessments
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM assessments"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(PaginatedAssessments {
            items,
            total,
            page,
            per_page: limit,
            total_pages: (total + limit - 1) / limit,
        })
    }

    pub async fn create_question(
        &self,
        assessment_id: Uuid,
        payload: CreateQuestionPayload,
    ) -> Result<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (
                assessment_id, kind, prompt_en, prompt_es, options,
                points, correct_answer, position
            )
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 10), $7, COALESCE($8, 0))
            RETURNING *
            "#,
        )
        .bind(assessment_id)
        .bind(payload.kind)
        .bind(payload.prompt_en)
        .bind(payload.prompt_es)
        .bind(payload.options)
        .bind(payload.points)
        .bind(payload.correct_answer)
        .bind(payload.position)
        .fetch_one(&self.pool)
        .await?;
        Ok(question)
    }

    pub async fn update_question(
        &self,
        question_id: Uuid,
        payload: UpdateQuestionPayload,
    ) -> Result<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET kind = COALESCE($2, kind),
                prompt_en = COALESCE($3, prompt_en),
                prompt_es = COALESCE($4, prompt_es),
                options = COALESCE($5, options),
                points = COALESCE($6, points),
                correct_answer = COALESCE($7, correct_answer),
                position = COALESCE($8, position),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(question_id)
        .bind(payload.kind)
        .bind(payload.prompt_en)
        .bind(payload.prompt_es)
        .bind(payload.options)
        .bind(payload.points)
        .bind(payload.correct_answer)
        .bind(payload.position)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Question not found".to_string()))?;
        Ok(question)
    }

    /// Staff view: every question including inactive ones, canonical
    /// answers included.
    pub async fn questions_for_assessment(&self, assessment_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT * FROM questions
            WHERE assessment_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    /// Create a recommendation rule. The condition payload is validated
    /// here, at authoring time; only pre-existing rows can carry
    /// malformed conditions (which the selector then skips).
    pub async fn create_rule(
        &self,
        assessment_id: Uuid,
        payload: CreateRulePayload,
    ) -> Result<RecommendationRule> {
        let condition = payload.condition.unwrap_or_else(|| json!({}));
        if RuleCondition::parse(&payload.condition_type, &condition).is_none() {
            return Err(Error::BadRequest(format!(
                "Invalid condition payload for condition type '{}'",
                payload.condition_type
            )));
        }

        let rule = sqlx::query_as::<_, RecommendationRule>(
            r#"
            INSERT INTO recommendation_rules (
                assessment_id, condition_type, condition, priority,
                title_en, title_es, body_en, body_es
            )
            VALUES ($1, $2, $3, COALESCE($4, 100), $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(assessment_id)
        .bind(payload.condition_type)
        .bind(condition)
        .bind(payload.priority)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.body_en)
        .bind(payload.body_es)
        .fetch_one(&self.pool)
        .await?;
        Ok(rule)
    }

    pub async fn update_rule(
        &self,
        rule_id: Uuid,
        payload: UpdateRulePayload,
    ) -> Result<RecommendationRule> {
        let existing = sqlx::query_as::<_, RecommendationRule>(
            r#"SELECT * FROM recommendation_rules WHERE id = $1"#,
        )
        .bind(rule_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Recommendation rule not found".to_string()))?;

        let condition_type = payload
            .condition_type
            .unwrap_or_else(|| existing.condition_type.clone());
        let condition = payload.condition.unwrap_or_else(|| existing.condition.clone());
        if RuleCondition::parse(&condition_type, &condition).is_none() {
            return Err(Error::BadRequest(format!(
                "Invalid condition payload for condition type '{}'",
                condition_type
            )));
        }

        let rule = sqlx::query_as::<_, RecommendationRule>(
            r#"
            UPDATE recommendation_rules
            SET condition_type = $2,
                condition = $3,
                priority = COALESCE($4, priority),
                title_en = COALESCE($5, title_en),
                title_es = COALESCE($6, title_es),
                body_en = COALESCE($7, body_en),
                body_es = COALESCE($8, body_es),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(rule_id)
        .bind(condition_type)
        .bind(condition)
        .bind(payload.priority)
        .bind(payload.title_en)
        .bind(payload.title_es)
        .bind(payload.body_en)
        .bind(payload.body_es)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(rule)
    }

    pub async fn rules_for_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<RecommendationRule>> {
        let rules = sqlx::query_as::<_, RecommendationRule>(
            r#"
            SELECT * FROM recommendation_rules
            WHERE assessment_id = $1
            ORDER BY priority ASC, created_at ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rules)
    }

    pub async fn list_responses(&self, filter: ResponseFilterQuery) -> Result<PaginatedResponses> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * limit;

        let items = sqlx::query_as::<_, AssessmentResponse>(
            r#"
            SELECT * FROM assessment_responses
            WHERE ($1::uuid IS NULL OR assessment_id = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
              AND ($3::boolean IS NULL OR passed = $3)
            ORDER BY completed_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.assessment_id)
        .bind(filter.user_id)
        .bind(filter.passed)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM assessment_responses
            WHERE ($1::uuid IS NULL OR assessment_id = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
              AND ($3::boolean IS NULL OR passed = $3)
            "#,
        )
        .bind(filter.assessment_id)
        .bind(filter.user_id)
        .bind(filter.passed)
        .fetch_one(&self.pool)
        .await?;

        Ok(PaginatedResponses {
            items,
            total,
            page,
            per_page: limit,
            total_pages: (total + limit - 1) / limit,
        })
    }
}
