mod models;
pub mod types;

pub use models::*;

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use types::Language;

pub type DbPool = Arc<PgPool>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|error| sqlx::Error::Migrate(Box::new(error)))
}

pub async fn create_submission(
    pool: &PgPool,
    user_id: Uuid,
    language: Language,
    source_code: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO submissions (user_id, language, source_code)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(language.as_str())
    .bind(source_code)
    .fetch_one(pool)
    .await
}

/// Column values for one analyses row; the question lists live in
/// generated_questions instead.
pub struct NewAnalysis<'a> {
    pub submission_id: Uuid,
    pub error_analysis: &'a str,
    pub corrected_code: &'a str,
    pub optimized_code: &'a str,
    pub complexity: serde_json::Value,
    pub explanation: &'a str,
    pub conceptual_dive: &'a str,
    pub company_relevance: serde_json::Value,
    pub practice_problems: serde_json::Value,
}

pub async fn create_analysis(pool: &PgPool, new: NewAnalysis<'_>) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO analyses (
            submission_id, error_analysis, corrected_code, optimized_code,
            complexity, explanation, conceptual_dive, company_relevance, practice_problems
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(new.submission_id)
    .bind(new.error_analysis)
    .bind(new.corrected_code)
    .bind(new.optimized_code)
    .bind(new.complexity)
    .bind(new.explanation)
    .bind(new.conceptual_dive)
    .bind(new.company_relevance)
    .bind(new.practice_problems)
    .fetch_one(pool)
    .await
}

pub struct NewQuestion {
    pub question_type: &'static str,
    pub question_text: String,
    pub answer_text: String,
}

/// Inserts the whole batch in one statement; UNNEST keeps the array order,
/// so the serial ids follow the batch order.
pub async fn create_questions(
    pool: &PgPool,
    analysis_id: Uuid,
    questions: &[NewQuestion],
) -> Result<u64, sqlx::Error> {
    let types: Vec<String> = questions.iter().map(|q| q.question_type.to_string()).collect();
    let texts: Vec<String> = questions.iter().map(|q| q.question_text.clone()).collect();
    let answers: Vec<String> = questions.iter().map(|q| q.answer_text.clone()).collect();

    let result = sqlx::query(
        r#"
        INSERT INTO generated_questions (analysis_id, question_type, question_text, answer_text)
        SELECT $1, t.question_type, t.question_text, t.answer_text
        FROM UNNEST($2::text[], $3::text[], $4::text[]) AS t(question_type, question_text, answer_text)
        "#,
    )
    .bind(analysis_id)
    .bind(&types)
    .bind(&texts)
    .bind(&answers)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Upserts the activity counters for one user. The streak grows on
/// consecutive days, holds within a day, and resets after a gap.
pub async fn touch_user_progress(
    pool: &PgPool,
    user_id: Uuid,
    today: NaiveDate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, total_submissions, streak_days, last_active)
        VALUES ($1, 1, 1, $2)
        ON CONFLICT (user_id) DO UPDATE SET
            total_submissions = user_progress.total_submissions + 1,
            streak_days = CASE
                WHEN user_progress.last_active = $2 THEN user_progress.streak_days
                WHEN user_progress.last_active = $2 - 1 THEN user_progress.streak_days + 1
                ELSE 1
            END,
            last_active = $2
        "#,
    )
    .bind(user_id)
    .bind(today)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_submissions(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        r#"
        SELECT id, user_id, language, source_code, created_at
        FROM submissions
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_submission(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT * FROM submissions WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_analysis(
    pool: &PgPool,
    submission_id: Uuid,
) -> Result<Option<Analysis>, sqlx::Error> {
    sqlx::query_as::<_, Analysis>(
        "SELECT * FROM analyses WHERE submission_id = $1",
    )
    .bind(submission_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_questions(
    pool: &PgPool,
    analysis_id: Uuid,
) -> Result<Vec<GeneratedQuestion>, sqlx::Error> {
    sqlx::query_as::<_, GeneratedQuestion>(
        "SELECT * FROM generated_questions WHERE analysis_id = $1 ORDER BY id",
    )
    .bind(analysis_id)
    .fetch_all(pool)
    .await
}

pub async fn get_user_progress(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserProgress>, sqlx::Error> {
    sqlx::query_as::<_, UserProgress>(
        "SELECT * FROM user_progress WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT * FROM profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
