//! Survey Repository

use super::{RepoError, RepoResult};
use shared::models::{
    QuestionType, Survey, SurveyCreate, SurveyResponse, SurveyResponseSubmit, SurveyType,
    SurveyUpdate,
};
use sqlx::SqlitePool;

const SURVEY_COLUMNS: &str = "id, survey_type, question, question_type, options, matching_weight, is_required, display_order, created_at, updated_at";
const RESPONSE_COLUMNS: &str =
    "id, dinner_id, member_id, responses, restaurant_rating, submitted_at";

/// Questions in display order, optionally of one survey type
pub async fn find_all(pool: &SqlitePool, survey_type: Option<SurveyType>) -> RepoResult<Vec<Survey>> {
    let sql = format!(
        "SELECT {SURVEY_COLUMNS} FROM survey WHERE (?1 IS NULL OR survey_type = ?1) ORDER BY display_order, id"
    );
    let rows = sqlx::query_as::<_, Survey>(&sql)
        .bind(survey_type)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Survey>> {
    let sql = format!("SELECT {SURVEY_COLUMNS} FROM survey WHERE id = ?");
    let row = sqlx::query_as::<_, Survey>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a question; `survey_type` and `question` must be present
pub async fn create(pool: &SqlitePool, data: SurveyCreate) -> RepoResult<Survey> {
    let survey_type = data
        .survey_type
        .ok_or_else(|| RepoError::Validation("survey_type is required".into()))?;
    let question = data
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| RepoError::Validation("question is required".into()))?;
    let options_json = serde_json::to_string(&data.options).unwrap_or_else(|_| "[]".to_string());

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO survey (id, survey_type, question, question_type, options, matching_weight, is_required, display_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(survey_type)
    .bind(question)
    .bind(data.question_type.unwrap_or(QuestionType::Text))
    .bind(options_json)
    .bind(data.matching_weight.unwrap_or(1))
    .bind(data.is_required.unwrap_or(true))
    .bind(data.display_order.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create survey".into()))
}

/// Partial update; absent fields keep their value
pub async fn update(pool: &SqlitePool, data: SurveyUpdate) -> RepoResult<Survey> {
    let now = shared::util::now_millis();
    let id = data.id;
    let options_json = data
        .options
        .as_ref()
        .map(|o| serde_json::to_string(o).unwrap_or_else(|_| "[]".to_string()));
    let rows = sqlx::query(
        "UPDATE survey SET survey_type = COALESCE(?1, survey_type), question = COALESCE(?2, question), question_type = COALESCE(?3, question_type), options = COALESCE(?4, options), matching_weight = COALESCE(?5, matching_weight), is_required = COALESCE(?6, is_required), display_order = COALESCE(?7, display_order), updated_at = ?8 WHERE id = ?9",
    )
    .bind(data.survey_type)
    .bind(data.question.map(|q| q.trim().to_string()))
    .bind(data.question_type)
    .bind(options_json)
    .bind(data.matching_weight)
    .bind(data.is_required)
    .bind(data.display_order)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Survey {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Survey {id} not found")))
}

/// Hard delete; stored answers keep their keys
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM survey WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Store a member's answers for a dinner, replacing an earlier submission
pub async fn record_response(
    pool: &SqlitePool,
    dinner_id: i64,
    member_id: i64,
    data: SurveyResponseSubmit,
) -> RepoResult<SurveyResponse> {
    let responses = data
        .responses
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    let responses_json = serde_json::to_string(&responses).unwrap_or_else(|_| "{}".to_string());
    let sql = format!(
        "INSERT INTO survey_response (id, dinner_id, member_id, responses, restaurant_rating, submitted_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) ON CONFLICT (dinner_id, member_id) DO UPDATE SET responses = excluded.responses, restaurant_rating = excluded.restaurant_rating, submitted_at = excluded.submitted_at RETURNING {RESPONSE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, SurveyResponse>(&sql)
        .bind(shared::util::snowflake_id())
        .bind(dinner_id)
        .bind(member_id)
        .bind(responses_json)
        .bind(data.restaurant_rating)
        .bind(shared::util::now_millis())
        .fetch_one(pool)
        .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::assignment;
    use crate::db::{fixtures, test_pool};
    use serde_json::json;
    use shared::models::SubscriptionStatus;

    fn question(survey_type: SurveyType, text: &str, display_order: i64) -> SurveyCreate {
        SurveyCreate {
            survey_type: Some(survey_type),
            question: Some(text.into()),
            display_order: Some(display_order),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_crud_and_type_filter() {
        let pool = test_pool().await;
        let later = create(&pool, question(SurveyType::Onboarding, "Favourite cuisine?", 2))
            .await
            .unwrap();
        assert_eq!(later.question_type, QuestionType::Text);
        assert_eq!(later.matching_weight, 1);
        assert!(later.is_required);
        assert!(later.options.is_empty());

        let first = create(
            &pool,
            SurveyCreate {
                question_type: Some(QuestionType::MultipleChoice),
                options: vec!["Early".into(), "Late".into()],
                ..question(SurveyType::Onboarding, "  Seating time?  ", 1)
            },
        )
        .await
        .unwrap();
        assert_eq!(first.question, "Seating time?");
        create(&pool, question(SurveyType::PostDinner, "How was the food?", 0))
            .await
            .unwrap();

        let all = find_all(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);
        let onboarding: Vec<i64> = find_all(&pool, Some(SurveyType::Onboarding))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(onboarding, vec![first.id, later.id]);

        let updated = update(
            &pool,
            SurveyUpdate {
                id: first.id,
                options: Some(vec!["Early".into(), "Late".into(), "Whenever".into()]),
                is_required: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.options.len(), 3);
        assert!(!updated.is_required);
        assert_eq!(updated.question, "Seating time?");
        assert_eq!(updated.question_type, QuestionType::MultipleChoice);

        assert!(delete(&pool, first.id).await.unwrap());
        assert!(!delete(&pool, first.id).await.unwrap());
        let err = update(&pool, SurveyUpdate { id: first.id, ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_requires_type_and_question() {
        let pool = test_pool().await;
        let err = create(
            &pool,
            SurveyCreate {
                question: Some("Why?".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        let err = create(&pool, question(SurveyType::Onboarding, "   ", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_response_upsert_shows_in_group_details() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 4).await;
        let ann = fixtures::member(&pool, "Ann", 1, SubscriptionStatus::Active).await;
        let ben = fixtures::member(&pool, "Ben", 1, SubscriptionStatus::Active).await;
        for (id, member) in [(1, ann), (2, ben)] {
            sqlx::query(
                "INSERT INTO dinner_assignment (id, dinner_id, member_id, table_number, assigned_at, credit_deducted) VALUES (?, ?, ?, 1, ?, 0)",
            )
            .bind(id)
            .bind(dinner)
            .bind(member)
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
        }

        let first = record_response(
            &pool,
            dinner,
            ann,
            SurveyResponseSubmit {
                responses: Some(json!({"1": "Loved it"})),
                restaurant_rating: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let again = record_response(
            &pool,
            dinner,
            ann,
            SurveyResponseSubmit {
                responses: Some(json!({"1": "Loved it", "2": "yes"})),
                restaurant_rating: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.restaurant_rating, Some(5));

        let details = assignment::find_details_by_dinner(&pool, dinner).await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].member_id, ann);
        assert_eq!(details[0].survey_data, Some(json!({"1": "Loved it", "2": "yes"})));
        assert_eq!(details[1].survey_data, None);
    }
}
