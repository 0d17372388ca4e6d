use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use rust_decimal::Decimal;
use serde_json::json;
use validator::Validate;

use crate::dto::curriculum_dto::MilestoneView;
use crate::dto::practice_dto::{
    CreatePracticeLogRequest, PracticeLogListResponse, PracticeLogQuery, PracticeSummaryResponse,
};
use crate::middleware::auth::Claims;
use crate::services::practice_service::NewPracticeLog;
use crate::AppState;

#[axum::debug_handler]
pub async fn create_practice_log(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePracticeLogRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user_id = claims.user_id()?;

    let skills = match req.skills {
        Some(tags) => Some(serde_json::to_value(tags)?),
        None => None,
    };
    let entry = NewPracticeLog {
        practiced_on: req.practiced_on,
        hours: req.hours,
        night: req.night.unwrap_or(false),
        skills,
        notes: req.notes,
        supervisor: req.supervisor,
    };

    let log = state.practice_service.log(user_id, entry).await?;
    let totals = state.practice_service.totals(user_id).await?;
    let earned = state
        .progress_service
        .check_practice_milestones(user_id, totals.total_hours)
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

    let earned_views: Vec<MilestoneView> = earned.iter().map(MilestoneView::from_model).collect();
    Ok(Json(json!({
        "log": log,
        "total_hours": totals.total_hours,
        "earned_milestones": earned_views,
    }))
    .into_response())
}

#[axum::debug_handler]
pub async fn list_practice_logs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(pagination): Query<PracticeLogQuery>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let page = pagination.page.unwrap_or(1).max(1);
    let limit = pagination.limit.unwrap_or(20).clamp(1, 100);

    let (items, total) = state.practice_service.list(user_id, page, limit).await?;
    Ok(Json(PracticeLogListResponse {
        items,
        total,
        page,
        per_page: limit,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn practice_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let totals = state.practice_service.totals(user_id).await?;
    let config = crate::config::get_config();

    let resp = PracticeSummaryResponse {
        total_hours: totals.total_hours,
        night_hours: totals.night_hours,
        sessions: totals.sessions,
        hours_goal: config.practice_hours_goal,
        night_hours_goal: config.night_hours_goal,
        hours_remaining: (config.practice_hours_goal - totals.total_hours).max(Decimal::ZERO),
        night_hours_remaining: (config.night_hours_goal - totals.night_hours).max(Decimal::ZERO),
    };
    Ok(Json(resp).into_response())
}
