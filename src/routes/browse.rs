use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::{self, Profile, UserProgress};
use crate::error::ApiError;
use crate::state::AppState;

const HISTORY_LIMIT: i64 = 50;

pub async fn history(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let submissions =
        db::list_submissions(state.pool.as_ref(), user_id, HISTORY_LIMIT).await?;
    Ok(Json(json!({ "submissions": submissions })))
}

pub async fn submission_detail(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(submission_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let submission = db::get_submission(state.pool.as_ref(), submission_id, user_id)
        .await?
        .ok_or(ApiError::NotFound("Submission not found"))?;

    let analysis = db::get_analysis(state.pool.as_ref(), submission.id).await?;
    let questions = match &analysis {
        Some(analysis) => db::list_questions(state.pool.as_ref(), analysis.id).await?,
        None => Vec::new(),
    };

    Ok(Json(json!({
        "submission": submission,
        "analysis": analysis,
        "questions": questions,
    })))
}

pub async fn progress(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProgress>, ApiError> {
    let progress = db::get_user_progress(state.pool.as_ref(), user_id)
        .await?
        .unwrap_or_else(|| UserProgress::empty(user_id));
    Ok(Json(progress))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = db::get_profile(state.pool.as_ref(), user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(profile))
}
