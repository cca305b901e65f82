//! Survey handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::SuccessResponse;
use crate::core::ServerState;
use crate::db::repository::{RepoError, dinner, member, survey};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, require_field, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    QuestionType, Survey, SurveyCreate, SurveyResponse, SurveyResponseSubmit, SurveyType,
    SurveyUpdate,
};

#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub survey_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SurveysResponse {
    pub surveys: Vec<Survey>,
}

#[derive(Debug, Serialize)]
pub struct SurveyBody {
    pub survey: Survey,
}

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub response: SurveyResponse,
}

/// `all` or absent means no filter
fn type_filter(raw: Option<&str>) -> AppResult<Option<SurveyType>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some("onboarding") => Ok(Some(SurveyType::Onboarding)),
        Some("post-dinner") => Ok(Some(SurveyType::PostDinner)),
        Some(other) => Err(AppError::validation(format!("Unknown survey type: {other}"))),
    }
}

fn validate_options(question_type: Option<QuestionType>, options: &[String]) -> AppResult<()> {
    for option in options {
        validate_required_text(option, "options", MAX_NAME_LEN)?;
    }
    if question_type == Some(QuestionType::MultipleChoice) && options.is_empty() {
        return Err(AppError::validation(
            "multiple_choice questions need at least one option",
        ));
    }
    Ok(())
}

/// GET /api/admin/surveys?type=all|onboarding|post-dinner
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TypeQuery>,
) -> AppResult<Json<SurveysResponse>> {
    let filter = type_filter(query.survey_type.as_deref())?;
    let surveys = survey::find_all(&state.pool, filter).await?;
    Ok(Json(SurveysResponse { surveys }))
}

/// POST /api/admin/surveys
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SurveyCreate>,
) -> AppResult<Json<SurveyBody>> {
    require_field(payload.survey_type, "survey_type")?;
    let question = require_field(payload.question.as_deref(), "question")?;
    validate_required_text(question, "question", MAX_NOTE_LEN)?;
    validate_options(payload.question_type, &payload.options)?;

    let survey = survey::create(&state.pool, payload).await?;
    tracing::info!(survey_id = survey.id, survey_type = ?survey.survey_type, "Survey question created");
    Ok(Json(SurveyBody { survey }))
}

/// PUT /api/admin/surveys - partial update, absent fields keep their value
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SurveyUpdate>,
) -> AppResult<Json<SurveyBody>> {
    if let Some(question) = &payload.question {
        validate_required_text(question, "question", MAX_NOTE_LEN)?;
    }
    if let Some(options) = &payload.options {
        validate_options(payload.question_type, options)?;
    }

    let survey = survey::update(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::SurveyNotFound),
            other => other.into(),
        })?;
    Ok(Json(SurveyBody { survey }))
}

/// DELETE /api/admin/surveys?id=
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<SuccessResponse>> {
    let id = require_field(query.id, "id")?;
    if !survey::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::SurveyNotFound));
    }
    tracing::info!(survey_id = id, "Survey question deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/admin/surveys/responses - record a member's answers for a dinner
pub async fn submit_response(
    State(state): State<ServerState>,
    Json(payload): Json<SurveyResponseSubmit>,
) -> AppResult<Json<ResponseBody>> {
    let dinner_id = require_field(payload.event_id, "event_id")?;
    let member_id = require_field(payload.user_id, "user_id")?;
    if let Some(responses) = &payload.responses
        && !responses.is_object()
    {
        return Err(AppError::validation("responses must be a JSON object"));
    }
    if let Some(rating) = payload.restaurant_rating
        && !(1..=5).contains(&rating)
    {
        return Err(AppError::validation("restaurant_rating must be between 1 and 5"));
    }

    if dinner::find_by_id(&state.pool, dinner_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::DinnerNotFound));
    }
    if member::find_by_id(&state.pool, member_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::MemberNotFound));
    }

    let response = survey::record_response(&state.pool, dinner_id, member_id, payload).await?;
    tracing::info!(dinner_id, member_id, "Survey response recorded");
    Ok(Json(ResponseBody { response }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_filter() {
        assert_eq!(type_filter(None).unwrap(), None);
        assert_eq!(type_filter(Some("all")).unwrap(), None);
        assert_eq!(
            type_filter(Some("post-dinner")).unwrap(),
            Some(SurveyType::PostDinner)
        );
        assert_eq!(
            type_filter(Some(" onboarding ")).unwrap(),
            Some(SurveyType::Onboarding)
        );
        assert!(type_filter(Some("exit")).is_err());
    }
}
