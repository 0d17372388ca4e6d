use crate::error::{Error, Result};
use crate::models::practice_log::PracticeLog;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct PracticeTotals {
    pub total_hours: Decimal,
    pub night_hours: Decimal,
    pub sessions: i64,
}

#[derive(Debug, Clone)]
pub struct NewPracticeLog {
    pub practiced_on: NaiveDate,
    pub hours: Decimal,
    pub night: bool,
    pub skills: Option<JsonValue>,
    pub notes: Option<String>,
    pub supervisor: Option<String>,
}

#[derive(Clone)]
pub struct PracticeService {
    pool: PgPool,
}

impl PracticeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn log(&self, user_id: Uuid, entry: NewPracticeLog) -> Result<PracticeLog> {
        if entry.hours <= Decimal::ZERO {
            return Err(Error::BadRequest(
                "Practice hours must be greater than zero".to_string(),
            ));
        }
        // A single session capped at 24h keeps typos out of the totals.
        if entry.hours > Decimal::from(24) {
            return Err(Error::BadRequest(
                "Practice hours for one session cannot exceed 24".to_string(),
            ));
        }

        let log = sqlx::query_as::<_, PracticeLog>(
            r#"
            INSERT INTO practice_logs (user_id, practiced_on, hours, night, skills, notes, supervisor)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(entry.practiced_on)
        .bind(entry.hours)
        .bind(entry.night)
        .bind(entry.skills)
        .bind(entry.notes)
        .bind(entry.supervisor)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<PracticeLog>, i64)> {
        let offset = (page - 1) * limit;
        let logs = sqlx::query_as::<_, PracticeLog>(
            r#"
            SELECT * FROM practice_logs
            WHERE user_id = $1
            ORDER BY practiced_on DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM practice_logs WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((logs, total))
    }

    pub async fn totals(&self, user_id: Uuid) -> Result<PracticeTotals> {
        let totals = sqlx::query_as::<_, PracticeTotals>(
            r#"
            SELECT
                COALESCE(SUM(hours), 0) AS total_hours,
                COALESCE(SUM(hours) FILTER (WHERE night), 0) AS night_hours,
                COUNT(*) AS sessions
            FROM practice_logs
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }
}
