use crate::error::Result;
use crate::models::user::User;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct AssessmentStats {
    pub assessment_id: Uuid,
    pub title_en: String,
    pub title_es: String,
    pub attempts: i64,
    pub passed: i64,
    pub avg_percentage: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardStats {
    pub learners: i64,
    pub responses: i64,
    pub passed_responses: i64,
    pub practice_hours_total: Decimal,
    pub unread_messages: i64,
    pub milestones_awarded: i64,
    pub assessments: Vec<AssessmentStats>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let learners: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM users WHERE role = 'learner' AND is_active = TRUE"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let (responses, passed_responses): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE passed)
            FROM assessment_responses
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let practice_hours_total: Decimal =
            sqlx::query_scalar(r#"SELECT COALESCE(SUM(hours), 0) FROM practice_logs"#)
                .fetch_one(&self.pool)
                .await?;

        let unread_messages: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM messages WHERE sender = 'learner' AND read_at IS NULL"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let milestones_awarded: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM user_milestones"#)
            .fetch_one(&self.pool)
            .await?;

        let assessments = sqlx::query_as::<_, AssessmentStats>(
            r#"
            SELECT a.id AS assessment_id, a.title_en, a.title_es,
                   COUNT(r.id) AS attempts,
                   COUNT(r.id) FILTER (WHERE r.passed) AS passed,
                   COALESCE(AVG(r.percentage_score), 0)::float8 AS avg_percentage
            FROM assessments a
            LEFT JOIN assessment_responses r ON r.assessment_id = a.id
            WHERE a.is_active = TRUE
            GROUP BY a.id
            ORDER BY a.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardStats {
            learners,
            responses,
            passed_responses,
            practice_hours_total,
            unread_messages,
            milestones_awarded,
            assessments,
        })
    }

    pub async fn learner_roster(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = 'learner'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
