//! Survey Model
//!
//! Questions are asked at onboarding or after a dinner. Answers for one
//! member at one dinner are kept together as a JSON object keyed by
//! question id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum SurveyType {
    #[default]
    #[serde(rename = "onboarding")]
    #[cfg_attr(feature = "db", sqlx(rename = "onboarding"))]
    Onboarding,
    #[serde(rename = "post-dinner")]
    #[cfg_attr(feature = "db", sqlx(rename = "post-dinner"))]
    PostDinner,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum QuestionType {
    #[default]
    Text,
    MultipleChoice,
    Rating,
    YesNo,
}

/// Survey question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Survey {
    pub id: i64,
    pub survey_type: SurveyType,
    pub question: String,
    pub question_type: QuestionType,
    /// JSON array of choices, empty unless `multiple_choice`
    #[cfg_attr(feature = "db", sqlx(json))]
    pub options: Vec<String>,
    /// How much this answer counts when grouping members
    pub matching_weight: i64,
    pub is_required: bool,
    pub display_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create survey question payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyCreate {
    pub survey_type: Option<SurveyType>,
    pub question: Option<String>,
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub options: Vec<String>,
    pub matching_weight: Option<i64>,
    pub is_required: Option<bool>,
    pub display_order: Option<i64>,
}

/// Update survey question payload (`PUT /api/admin/surveys`, id in body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyUpdate {
    pub id: i64,
    pub survey_type: Option<SurveyType>,
    pub question: Option<String>,
    pub question_type: Option<QuestionType>,
    pub options: Option<Vec<String>>,
    pub matching_weight: Option<i64>,
    pub is_required: Option<bool>,
    pub display_order: Option<i64>,
}

/// One member's answers for one dinner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SurveyResponse {
    pub id: i64,
    #[serde(rename = "event_id")]
    pub dinner_id: i64,
    #[serde(rename = "user_id")]
    pub member_id: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub responses: serde_json::Value,
    /// 1..=5, feeds restaurant performance
    pub restaurant_rating: Option<i64>,
    pub submitted_at: i64,
}

/// `POST /api/admin/surveys/responses` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyResponseSubmit {
    pub event_id: Option<i64>,
    pub user_id: Option<i64>,
    pub responses: Option<serde_json::Value>,
    pub restaurant_rating: Option<i64>,
}
