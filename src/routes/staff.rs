use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::dto::message_dto::SendMessageRequest;
use crate::dto::staff_dto::{
    CreateAssessmentPayload, CreateLessonPayload, CreateModulePayload, CreateQuestionPayload,
    CreateRulePayload, PaginationQuery, ResponseFilterQuery, UpdateAssessmentPayload,
    UpdateLessonPayload, UpdateModulePayload, UpdateQuestionPayload, UpdateRulePayload,
};
use crate::models::message::MessageSender;
use crate::AppState;

pub async fn create_module(
    State(state): State<AppState>,
    Json(payload): Json<CreateModulePayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let module = state.content_service.create_module(payload).await?;
    Ok((StatusCode::CREATED, Json(module)).into_response())
}

pub async fn update_module(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<UpdateModulePayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let module = state.content_service.update_module(module_id, payload).await?;
    Ok(Json(module).into_response())
}

pub async fn list_modules(State(state): State<AppState>) -> crate::error::Result<Response> {
    let modules = state.content_service.list_modules(true).await?;
    Ok(Json(modules).into_response())
}

pub async fn list_module_lessons(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let lessons = state.content_service.lessons_for_module(module_id).await?;
    Ok(Json(lessons).into_response())
}

pub async fn create_lesson(
    State(state): State<AppState>,
    Json(payload): Json<CreateLessonPayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let lesson = state.content_service.create_lesson(payload).await?;
    Ok((StatusCode::CREATED, Json(lesson)).into_response())
}

pub async fn update_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(payload): Json<UpdateLessonPayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let lesson = state.content_service.update_lesson(lesson_id, payload).await?;
    Ok(Json(lesson).into_response())
}

#[utoipa::path(
    post,
    path = "/api/staff/assessments",
    request_body = CreateAssessmentPayload,
    responses(
        (status = 201, description = "Assessment created"),
        (status = 400, description = "Invalid payload"),
    ),
)]
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssessmentPayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let assessment = state.content_service.create_assessment(payload).await?;
    Ok((StatusCode::CREATED, Json(assessment)).into_response())
}

pub async fn update_assessment(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
    Json(payload): Json<UpdateAssessmentPayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let assessment = state
        .content_service
        .update_assessment(assessment_id, payload)
        .await?;
    Ok(Json(assessment).into_response())
}

pub async fn list_assessments(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> crate::error::Result<Response> {
    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20);
    let assessments = state.content_service.list_assessments(page, limit).await?;
    Ok(Json(assessments).into_response())
}

pub async fn list_questions(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let questions = state
        .content_service
        .questions_for_assessment(assessment_id)
        .await?;
    Ok(Json(questions).into_response())
}

pub async fn create_question(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
    Json(payload): Json<CreateQuestionPayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let question = state
        .content_service
        .create_question(assessment_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(question)).into_response())
}

pub async fn update_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<UpdateQuestionPayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let question = state
        .content_service
        .update_question(question_id, payload)
        .await?;
    Ok(Json(question).into_response())
}

pub async fn list_rules(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let rules = state
        .content_service
        .rules_for_assessment(assessment_id)
        .await?;
    Ok(Json(rules).into_response())
}

pub async fn create_rule(
    State(state): State<AppState>,
    Path(assessment_id): Path<Uuid>,
    Json(payload): Json<CreateRulePayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let rule = state
        .content_service
        .create_rule(assessment_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(rule)).into_response())
}

pub async fn update_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<Uuid>,
    Json(payload): Json<UpdateRulePayload>,
) -> crate::error::Result<Response> {
    payload.validate()?;
    let rule = state.content_service.update_rule(rule_id, payload).await?;
    Ok(Json(rule).into_response())
}

#[utoipa::path(
    get,
    path = "/api/staff/responses",
    params(
        ("assessment_id" = Option<String>, Query, description = "Filter by assessment"),
        ("user_id" = Option<String>, Query, description = "Filter by learner"),
        ("passed" = Option<bool>, Query, description = "Filter by pass flag"),
    ),
    responses(
        (status = 200, description = "Paginated submission list"),
    ),
)]
pub async fn list_responses(
    State(state): State<AppState>,
    Query(filter): Query<ResponseFilterQuery>,
) -> crate::error::Result<Response> {
    let responses = state.content_service.list_responses(filter).await?;
    Ok(Json(responses).into_response())
}

#[utoipa::path(
    get,
    path = "/api/staff/dashboard",
    responses(
        (status = 200, description = "Aggregate platform statistics"),
    ),
)]
pub async fn dashboard(State(state): State<AppState>) -> crate::error::Result<Response> {
    let stats = state.analytics_service.dashboard().await?;
    Ok(Json(stats).into_response())
}

pub async fn learner_roster(State(state): State<AppState>) -> crate::error::Result<Response> {
    let learners = state.analytics_service.learner_roster().await?;
    Ok(Json(learners).into_response())
}

/// Reading a learner's thread marks their messages as read.
pub async fn learner_thread(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    state
        .message_service
        .mark_read(user_id, MessageSender::Learner)
        .await?;
    let messages = state.message_service.thread(user_id).await?;
    Ok(Json(messages).into_response())
}

pub async fn send_coach_message(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let message = state
        .message_service
        .send(user_id, MessageSender::Coach, &req.body)
        .await?;
    Ok((StatusCode::CREATED, Json(message)).into_response())
}

pub async fn unread_messages(State(state): State<AppState>) -> crate::error::Result<Response> {
    let count = state.message_service.total_unread_from_learners().await?;
    Ok(Json(json!({ "unread": count })).into_response())
}
