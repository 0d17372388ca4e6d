use crate::models::practice_log::PracticeLog;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePracticeLogRequest {
    pub practiced_on: NaiveDate,
    pub hours: Decimal,
    pub night: Option<bool>,
    pub skills: Option<Vec<String>>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(max = 120))]
    pub supervisor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PracticeLogQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PracticeLogListResponse {
    pub items: Vec<PracticeLog>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PracticeSummaryResponse {
    pub total_hours: Decimal,
    pub night_hours: Decimal,
    pub sessions: i64,
    pub hours_goal: Decimal,
    pub night_hours_goal: Decimal,
    pub hours_remaining: Decimal,
    pub night_hours_remaining: Decimal,
}
