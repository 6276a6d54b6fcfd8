use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub language: String,
    pub source_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Analysis {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub error_analysis: String,
    pub corrected_code: String,
    pub optimized_code: String,
    pub complexity: Json<serde_json::Value>,
    pub explanation: String,
    pub conceptual_dive: String,
    pub company_relevance: Json<serde_json::Value>,
    pub practice_problems: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: i64,
    pub analysis_id: Uuid,
    pub question_type: String,
    pub question_text: String,
    pub answer_text: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: Uuid,
    pub total_submissions: i32,
    pub streak_days: i32,
    pub easy_questions_solved: i32,
    pub medium_questions_solved: i32,
    pub hard_questions_solved: i32,
    pub last_active: Option<NaiveDate>,
}

impl UserProgress {
    /// Zeroed row shown to a user who has not submitted anything yet.
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            total_submissions: 0,
            streak_days: 0,
            easy_questions_solved: 0,
            medium_questions_solved: 0,
            hard_questions_solved: 0,
            last_active: None,
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}
