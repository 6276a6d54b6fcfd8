use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::ai;
use crate::auth::AuthUser;
use crate::db::types::Language;
use crate::error::ApiError;
use crate::persist;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    source_code: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

/// Runs the full analysis flow: validate, format the prompt, call the AI
/// gateway, parse its reply, persist, and relay the parsed object. The
/// response is built from the in-memory result, never re-read from storage.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<Value>, ApiError> {
    let (Some(source_code), Some(language)) =
        (body.source_code.as_deref(), body.language.as_deref())
    else {
        return Err(ApiError::Validation("source_code and language are required"));
    };

    if source_code.trim().is_empty() {
        return Err(ApiError::Validation("source_code and language are required"));
    }

    let language: Language = language.parse().map_err(|_| {
        ApiError::Validation("language must be one of python, java, cpp, javascript, typescript")
    })?;

    let messages = ai::build_messages(language, source_code);
    let content = state.gateway.chat(messages).await?;
    let mut analysis = ai::extract_analysis(&content)?;

    let outcome = persist::persist_analysis(
        state.pool.as_ref(),
        user_id,
        language,
        source_code,
        &analysis,
    )
    .await
    .map_err(|err| {
        tracing::error!(error = %err, %user_id, "failed to save submission");
        ApiError::Internal("Failed to save submission")
    })?;

    info!(
        submission_id = %outcome.submission_id,
        analysis_saved = outcome.analysis_id.is_some(),
        questions = outcome.questions_inserted,
        progress_updated = outcome.progress_updated,
        "analysis persisted"
    );

    if let Value::Object(map) = &mut analysis {
        map.insert("source_code".to_string(), Value::String(source_code.to_string()));
        map.insert("language".to_string(), Value::String(language.as_str().to_string()));
    }

    Ok(Json(json!({ "analysis": analysis })))
}
