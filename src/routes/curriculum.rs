use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::dto::curriculum_dto::{
    CompleteLessonRequest, CompleteLessonResponse, LessonView, MilestoneView, ModuleProgressView,
    ModuleView, ProgressSummaryResponse,
};
use crate::middleware::auth::Claims;
use crate::utils::language::LangQuery;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_modules(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(lang): Query<LangQuery>,
) -> crate::error::Result<Response> {
    let lang = lang.resolve();
    let user_id = claims.user_id()?;

    let modules = state.content_service.list_modules(false).await?;
    let completed: HashMap<Uuid, chrono::DateTime<chrono::Utc>> = state
        .progress_service
        .completed_lessons(user_id)
        .await?
        .into_iter()
        .map(|p| (p.lesson_id, p.completed_at))
        .collect();

    let mut views = Vec::with_capacity(modules.len());
    for module in &modules {
        let lessons = state.content_service.lessons_for_module(module.id).await?;
        let lesson_views: Vec<LessonView> = lessons
            .iter()
            .filter(|l| l.is_active)
            .map(|l| LessonView::from_model(l, lang, completed.get(&l.id).copied()))
            .collect();
        views.push(ModuleView::from_model(module, lang, lesson_views));
    }
    Ok(Json(views).into_response())
}

#[axum::debug_handler]
pub async fn complete_lesson(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(lesson_id): Path<Uuid>,
    Json(req): Json<CompleteLessonRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user_id = claims.user_id()?;

    let (progress, earned) = state
        .progress_service
        .complete_lesson(user_id, lesson_id, req.time_spent_seconds)
        .await?;

    for milestone in &earned {
        let payload = json!({
            "event": "milestone_achieved",
            "user_id": user_id,
            "milestone": milestone.code,
        });
        if let Err(e) = state
            .notification_service
            .enqueue("milestone_achieved", &payload)
            .await
        {
            tracing::error!(error = ?e, "failed to enqueue milestone webhook");
        }
    }

    let resp = CompleteLessonResponse {
        lesson_id: progress.lesson_id,
        completed_at: progress.completed_at,
        earned_milestones: earned.iter().map(MilestoneView::from_model).collect(),
    };
    Ok(Json(resp).into_response())
}

#[axum::debug_handler]
pub async fn progress_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(lang): Query<LangQuery>,
) -> crate::error::Result<Response> {
    let lang = lang.resolve();
    let user_id = claims.user_id()?;

    let modules = state.progress_service.module_progress(user_id).await?;
    let milestones = state.progress_service.achieved_milestones(user_id).await?;

    let resp = ProgressSummaryResponse {
        modules: modules
            .iter()
            .map(|row| ModuleProgressView::from_row(row, lang))
            .collect(),
        milestones: milestones.iter().map(MilestoneView::from_model).collect(),
    };
    Ok(Json(resp).into_response())
}
