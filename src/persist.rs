use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::{error, warn};
use uuid::Uuid;

use crate::db::types::{Language, QuestionTier};
use crate::db::{self, NewAnalysis, NewQuestion};

/// What each persistence step did for one analysis run.
#[derive(Debug)]
pub struct PersistOutcome {
    pub submission_id: Uuid,
    pub analysis_id: Option<Uuid>,
    pub questions_inserted: usize,
    pub progress_updated: bool,
}

/// Writes one analysis run to storage as an ordered pipeline of steps:
///
/// 1. submission insert — fatal on failure, nothing else is attempted
/// 2. analysis insert — logged on failure; the submission row stays
/// 3. question batch insert — logged on failure; skipped when empty
/// 4. user_progress upsert — logged on failure
///
/// Later-step failures are never rolled back; an orphaned submission is
/// accepted over losing the whole run.
pub async fn persist_analysis(
    pool: &PgPool,
    user_id: Uuid,
    language: Language,
    source_code: &str,
    analysis: &Value,
) -> Result<PersistOutcome, sqlx::Error> {
    let submission_id = db::create_submission(pool, user_id, language, source_code).await?;

    let mut outcome = PersistOutcome {
        submission_id,
        analysis_id: None,
        questions_inserted: 0,
        progress_updated: false,
    };

    let analysis_id = match db::create_analysis(pool, new_analysis(submission_id, analysis)).await {
        Ok(id) => id,
        Err(err) => {
            error!(error = %err, %submission_id, "failed to save analysis row");
            touch_progress(pool, user_id, &mut outcome).await;
            return Ok(outcome);
        }
    };
    outcome.analysis_id = Some(analysis_id);

    let questions = question_batch(analysis);
    if !questions.is_empty() {
        match db::create_questions(pool, analysis_id, &questions).await {
            Ok(inserted) => outcome.questions_inserted = inserted as usize,
            Err(err) => error!(error = %err, %analysis_id, "failed to save generated questions"),
        }
    }

    touch_progress(pool, user_id, &mut outcome).await;
    Ok(outcome)
}

async fn touch_progress(pool: &PgPool, user_id: Uuid, outcome: &mut PersistOutcome) {
    let today = Utc::now().date_naive();
    match db::touch_user_progress(pool, user_id, today).await {
        Ok(()) => outcome.progress_updated = true,
        Err(err) => warn!(error = %err, %user_id, "failed to update user progress"),
    }
}

fn new_analysis(submission_id: Uuid, analysis: &Value) -> NewAnalysis<'_> {
    NewAnalysis {
        submission_id,
        error_analysis: str_field(analysis, "error_analysis"),
        corrected_code: str_field(analysis, "corrected_code"),
        optimized_code: str_field(analysis, "optimized_code"),
        complexity: json!({
            "time": analysis.get("time_complexity").cloned().unwrap_or(Value::Null),
            "space": analysis.get("space_complexity").cloned().unwrap_or(Value::Null),
        }),
        explanation: str_field(analysis, "step_by_step"),
        conceptual_dive: str_field(analysis, "conceptual_dive"),
        company_relevance: analysis
            .get("company_relevance")
            .cloned()
            .unwrap_or_else(|| json!([])),
        practice_problems: analysis
            .get("practice_problems")
            .cloned()
            .unwrap_or_else(|| json!([])),
    }
}

// The model is trusted to follow the requested schema; a missing field
// becomes an empty column instead of failing the write.
fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Flattens the three interview tiers plus the viva questions into one
/// ordered, tier-tagged batch.
pub fn question_batch(analysis: &Value) -> Vec<NewQuestion> {
    let mut batch = Vec::new();

    for tier in QuestionTier::INTERVIEW {
        let entries = analysis
            .get("interview_questions")
            .and_then(|q| q.get(tier.as_str()))
            .and_then(Value::as_array);
        push_questions(&mut batch, tier, entries);
    }

    push_questions(
        &mut batch,
        QuestionTier::Viva,
        analysis.get("viva_questions").and_then(Value::as_array),
    );

    batch
}

fn push_questions(batch: &mut Vec<NewQuestion>, tier: QuestionTier, entries: Option<&Vec<Value>>) {
    let Some(entries) = entries else { return };
    for entry in entries {
        batch.push(NewQuestion {
            question_type: tier.as_str(),
            question_text: str_field(entry, "question").to_string(),
            answer_text: str_field(entry, "answer").to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa(question: &str, answer: &str) -> Value {
        json!({ "question": question, "answer": answer })
    }

    #[test]
    fn flattens_tiers_in_order_with_viva_last() {
        let analysis = json!({
            "interview_questions": {
                "easy": [qa("e1", "a1"), qa("e2", "a2")],
                "medium": [qa("m1", "a3")],
                "hard": [qa("h1", "a4")]
            },
            "viva_questions": [qa("v1", "a5"), qa("v2", "a6")]
        });

        let batch = question_batch(&analysis);
        let tags: Vec<&str> = batch.iter().map(|q| q.question_type).collect();
        assert_eq!(tags, ["easy", "easy", "medium", "hard", "viva", "viva"]);
        assert_eq!(batch[0].question_text, "e1");
        assert_eq!(batch[5].answer_text, "a6");
    }

    #[test]
    fn missing_question_lists_produce_an_empty_batch() {
        assert!(question_batch(&json!({})).is_empty());
        assert!(question_batch(&json!({ "interview_questions": {} })).is_empty());
    }

    #[test]
    fn malformed_entries_fall_back_to_empty_strings() {
        let analysis = json!({ "viva_questions": [{ "question": 42 }] });
        let batch = question_batch(&analysis);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].question_text, "");
        assert_eq!(batch[0].answer_text, "");
    }

    #[test]
    fn complexity_is_serialized_as_one_composite_field() {
        let analysis = json!({
            "time_complexity": "O(n)",
            "space_complexity": "O(1)"
        });
        let new = new_analysis(Uuid::new_v4(), &analysis);
        assert_eq!(new.complexity, json!({ "time": "O(n)", "space": "O(1)" }));
    }

    #[test]
    fn missing_scalar_fields_become_empty_columns() {
        let new = new_analysis(Uuid::new_v4(), &json!({}));
        assert_eq!(new.error_analysis, "");
        assert_eq!(new.corrected_code, "");
        assert_eq!(new.complexity, json!({ "time": null, "space": null }));
        assert_eq!(new.company_relevance, json!([]));
        assert_eq!(new.practice_problems, json!([]));
    }
}
