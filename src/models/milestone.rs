use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "milestone_kind", rename_all = "snake_case")]
pub enum MilestoneKind {
    ModuleCompleted,
    PracticeHours,
    AssessmentPassed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Milestone {
    pub id: Uuid,
    pub code: String,
    pub kind: MilestoneKind,
    pub module_id: Option<Uuid>,
    pub assessment_id: Option<Uuid>,
    pub hours_required: Option<Decimal>,
    pub title_en: String,
    pub title_es: String,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserMilestone {
    pub id: Uuid,
    pub user_id: Uuid,
    pub milestone_id: Uuid,
    pub achieved_at: DateTime<Utc>,
}
