use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::assessment_dto::{
    AssessmentDetail, AssessmentSummary, QuestionView, RecommendationView, ResponseSummary,
    SubmitAssessmentRequest, SubmitAssessmentResponse,
};
use crate::dto::curriculum_dto::MilestoneView;
use crate::middleware::auth::Claims;
use crate::services::progress_service::ProgressService;
use crate::utils::language::LangQuery;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_assessments(
    State(state): State<AppState>,
    Query(lang): Query<LangQuery>,
) -> crate::error::Result<Response> {
    let lang = lang.resolve();
    let assessments = state.assessment_service.list_active().await?;
    let body: Vec<AssessmentSummary> = assessments
        .iter()
        .map(|a| AssessmentSummary::from_model(a, lang))
        .collect();
    Ok(Json(body).into_response())
}

#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
    Query(lang): Query<LangQuery>,
) -> crate::error::Result<Response> {
    let lang = lang.resolve();
    let assessment = state.assessment_service.get_active(assessment_id).await?;
    let questions = state
        .assessment_service
        .active_questions(assessment_id)
        .await?;

    let detail = AssessmentDetail {
        summary: AssessmentSummary::from_model(&assessment, lang),
        questions: questions
            .iter()
            .map(|q| QuestionView::from_model(q, lang))
            .collect(),
    };
    Ok(Json(detail).into_response())
}

#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(assessment_id): Path<Uuid>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user_id = claims.user_id()?;

    let outcome = state
        .assessment_service
        .submit(user_id, assessment_id, &req.answers, req.time_spent_seconds)
        .await?;

    let progress = ProgressService::new(state.pool.clone());
    let earned = progress
        .check_assessment_milestones(user_id, assessment_id, outcome.response.passed)
        .await?;

    let completed_event = json!({
        "event": "assessment_completed",
        "response_id": outcome.response.id,
        "assessment_id": assessment_id,
        "user_id": user_id,
        "score": outcome.response.score,
        "percentage_score": outcome.response.percentage_score,
        "passed": outcome.response.passed,
    });
    if let Err(e) = state
        .notification_service
        .enqueue("assessment_completed", &completed_event)
        .await
    {
        tracing::error!(error = ?e, "failed to enqueue assessment webhook");
    }
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

    let resp = SubmitAssessmentResponse {
        id: outcome.response.id,
        assessment_id,
        score: outcome.response.score,
        max_possible_score: outcome.response.max_possible_score,
        percentage_score: outcome.response.percentage_score,
        passed: outcome.response.passed,
        time_spent_seconds: outcome.response.time_spent_seconds,
        completed_at: outcome.response.completed_at,
        recommendations: outcome
            .recommendations
            .iter()
            .map(|(rule, grant)| RecommendationView::from_match(rule, grant))
            .collect(),
        earned_milestones: earned.iter().map(MilestoneView::from_model).collect(),
    };
    Ok(Json(resp).into_response())
}

#[axum::debug_handler]
pub async fn my_attempts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(assessment_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let responses = state
        .assessment_service
        .responses_for_user(user_id, assessment_id)
        .await?;
    let body: Vec<ResponseSummary> = responses.iter().map(ResponseSummary::from_model).collect();
    Ok(Json(body).into_response())
}
