use crate::models::curriculum::{CourseModule, Lesson};
use crate::models::milestone::Milestone;
use crate::services::progress_service::ModuleProgressRow;
use crate::utils::language::Lang;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub estimated_minutes: Option<i32>,
    pub position: i32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl LessonView {
    pub fn from_model(lesson: &Lesson, lang: Lang, completed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: lesson.id,
            slug: lesson.slug.clone(),
            title: lang.pick(&lesson.title_en, &lesson.title_es).to_string(),
            content: lang.pick_opt(&lesson.content_en, &lesson.content_es),
            estimated_minutes: lesson.estimated_minutes,
            position: lesson.position,
            completed: completed_at.is_some(),
            completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub position: i32,
    pub lessons: Vec<LessonView>,
}

impl ModuleView {
    pub fn from_model(module: &CourseModule, lang: Lang, lessons: Vec<LessonView>) -> Self {
        Self {
            id: module.id,
            slug: module.slug.clone(),
            title: lang.pick(&module.title_en, &module.title_es).to_string(),
            summary: lang.pick_opt(&module.summary_en, &module.summary_es),
            position: module.position,
            lessons,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteLessonRequest {
    #[validate(range(min = 0))]
    pub time_spent_seconds: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneView {
    pub id: Uuid,
    pub code: String,
    pub title_en: String,
    pub title_es: String,
}

impl MilestoneView {
    pub fn from_model(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id,
            code: milestone.code.clone(),
            title_en: milestone.title_en.clone(),
            title_es: milestone.title_es.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteLessonResponse {
    pub lesson_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub earned_milestones: Vec<MilestoneView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleProgressView {
    pub module_id: Uuid,
    pub slug: String,
    pub title: String,
    pub total_lessons: i64,
    pub completed_lessons: i64,
    pub percent_complete: i32,
}

impl ModuleProgressView {
    pub fn from_row(row: &ModuleProgressRow, lang: Lang) -> Self {
        let percent_complete = if row.total_lessons > 0 {
            (100.0 * row.completed_lessons as f64 / row.total_lessons as f64).round() as i32
        } else {
            0
        };
        Self {
            module_id: row.module_id,
            slug: row.slug.clone(),
            title: lang.pick(&row.title_en, &row.title_es).to_string(),
            total_lessons: row.total_lessons,
            completed_lessons: row.completed_lessons,
            percent_complete,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummaryResponse {
    pub modules: Vec<ModuleProgressView>,
    pub milestones: Vec<MilestoneView>,
}
