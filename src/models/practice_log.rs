use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PracticeLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub practiced_on: NaiveDate,
    pub hours: Decimal,
    pub night: bool,
    pub skills: Option<JsonValue>,
    pub notes: Option<String>,
    pub supervisor: Option<String>,
    pub created_at: DateTime<Utc>,
}
