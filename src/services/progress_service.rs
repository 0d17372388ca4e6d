use crate::error::{Error, Result};
use crate::models::curriculum::{Lesson, LessonProgress};
use crate::models::milestone::{Milestone, UserMilestone};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct ModuleProgressRow {
    pub module_id: Uuid,
    pub slug: String,
    pub title_en: String,
    pub title_es: String,
    pub position: i32,
    pub total_lessons: i64,
    pub completed_lessons: i64,
}

#[derive(Clone)]
pub struct ProgressService {
    pool: PgPool,
}

impl ProgressService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a lesson as complete for a learner. Idempotent: repeating
    /// the call updates the time spent but never duplicates the row.
    /// Returns the progress row and any milestones newly earned by
    /// finishing the lesson's module.
    pub async fn complete_lesson(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        time_spent_seconds: Option<i32>,
    ) -> Result<(LessonProgress, Vec<Milestone>)> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"SELECT * FROM lessons WHERE id = $1 AND is_active = TRUE"#,
        )
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Lesson not found".to_string()))?;

        let progress = sqlx::query_as::<_, LessonProgress>(
            r#"
            INSERT INTO lesson_progress (user_id, lesson_id, time_spent_seconds)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, lesson_id) DO UPDATE
                SET time_spent_seconds = COALESCE(EXCLUDED.time_spent_seconds, lesson_progress.time_spent_seconds)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .bind(time_spent_seconds)
        .fetch_one(&self.pool)
        .await?;

        let mut earned = Vec::new();
        if self.module_is_complete(user_id, lesson.module_id).await? {
            earned = self
                .award_module_milestones(user_id, lesson.module_id)
                .await?;
        }

        Ok((progress, earned))
    }

    async fn module_is_complete(&self, user_id: Uuid, module_id: Uuid) -> Result<bool> {
        let remaining: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM lessons l
            WHERE l.module_id = $1 AND l.is_active = TRUE
              AND NOT EXISTS (
                SELECT 1 FROM lesson_progress lp
                WHERE lp.lesson_id = l.id AND lp.user_id = $2
              )
            "#,
        )
        .bind(module_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(remaining == 0)
    }

    async fn award_module_milestones(
        &self,
        user_id: Uuid,
        module_id: Uuid,
    ) -> Result<Vec<Milestone>> {
        let milestones = sqlx::query_as::<_, Milestone>(
            r#"
            SELECT * FROM milestones
            WHERE kind = 'module_completed' AND module_id = $1 AND is_active = TRUE
            ORDER BY position ASC
            "#,
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;
        self.award_new(user_id, milestones).await
    }

    /// Milestones tied to passing a given assessment. No-op unless the
    /// submission actually passed.
    pub async fn check_assessment_milestones(
        &self,
        user_id: Uuid,
        assessment_id: Uuid,
        passed: bool,
    ) -> Result<Vec<Milestone>> {
        if !passed {
            return Ok(Vec::new());
        }
        let milestones = sqlx::query_as::<_, Milestone>(
            r#"
            SELECT * FROM milestones
            WHERE kind = 'assessment_passed' AND assessment_id = $1 AND is_active = TRUE
            ORDER BY position ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        self.award_new(user_id, milestones).await
    }

    /// Milestones whose practice-hour threshold the learner's running
    /// total has reached.
    pub async fn check_practice_milestones(
        &self,
        user_id: Uuid,
        total_hours: Decimal,
    ) -> Result<Vec<Milestone>> {
        let milestones = sqlx::query_as::<_, Milestone>(
            r#"
            SELECT * FROM milestones
            WHERE kind = 'practice_hours' AND hours_required IS NOT NULL
              AND hours_required <= $1 AND is_active = TRUE
            ORDER BY position ASC
            "#,
        )
        .bind(total_hours)
        .fetch_all(&self.pool)
        .await?;
        self.award_new(user_id, milestones).await
    }

    /// Grant each milestone at most once per learner; returns only the
    /// ones that were newly awarded by this call.
    async fn award_new(&self, user_id: Uuid, milestones: Vec<Milestone>) -> Result<Vec<Milestone>> {
        let mut earned = Vec::new();
        for milestone in milestones {
            let inserted = sqlx::query_as::<_, UserMilestone>(
                r#"
                INSERT INTO user_milestones (user_id, milestone_id)
                VALUES ($1, $2)
                ON CONFLICT (user_id, milestone_id) DO NOTHING
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(milestone.id)
            .fetch_optional(&self.pool)
            .await?;
            if inserted.is_some() {
                tracing::info!(user_id = %user_id, milestone = %milestone.code, "milestone achieved");
                earned.push(milestone);
            }
        }
        Ok(earned)
    }

    pub async fn module_progress(&self, user_id: Uuid) -> Result<Vec<ModuleProgressRow>> {
        let rows = sqlx::query_as::<_, ModuleProgressRow>(
            r#"
            SELECT m.id AS module_id, m.slug, m.title_en, m.title_es, m.position,
                   COUNT(l.id) AS total_lessons,
                   COUNT(lp.id) AS completed_lessons
            FROM course_modules m
            LEFT JOIN lessons l ON l.module_id = m.id AND l.is_active = TRUE
            LEFT JOIN lesson_progress lp ON lp.lesson_id = l.id AND lp.user_id = $1
            WHERE m.is_active = TRUE
            GROUP BY m.id
            ORDER BY m.position ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn achieved_milestones(&self, user_id: Uuid) -> Result<Vec<Milestone>> {
        let milestones = sqlx::query_as::<_, Milestone>(
            r#"
            SELECT m.* FROM milestones m
            JOIN user_milestones um ON um.milestone_id = m.id
            WHERE um.user_id = $1
            ORDER BY um.achieved_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(milestones)
    }

    pub async fn completed_lessons(&self, user_id: Uuid) -> Result<Vec<LessonProgress>> {
        let rows = sqlx::query_as::<_, LessonProgress>(
            r#"SELECT * FROM lesson_progress WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
