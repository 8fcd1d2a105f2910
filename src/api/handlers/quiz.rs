use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use crate::api::fragments;
use crate::api::state::AppState;
use crate::error::Result;
use crate::llm::prompts;
use crate::reply;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
}

/// Quiz pipeline: ask the model for one question in JSON mode, parse it
/// strictly, and return the question fragment.
pub async fn generate_quiz(
    State(state): State<AppState>,
    Form(req): Form<QuizRequest>,
) -> Result<Html<String>> {
    tracing::info!(topic = %req.topic, "quiz request");

    let raw = state
        .quiz
        .complete(
            prompts::QUIZ_SYSTEM_PROMPT,
            &prompts::quiz_user_prompt(&req.topic),
            true,
        )
        .await?;
    let item = reply::parse_quiz(&raw)?;

    Ok(Html(fragments::quiz_question(&item)))
}

/// The correct answer and explanation round-trip through hidden form fields;
/// the server keeps no record of which question was asked.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub selected_answer: String,
    pub correct_answer: String,
    pub explanation: String,
}

/// Grades by trimmed string equality. Cannot fail, so no error path.
pub async fn submit_answer(Form(req): Form<AnswerRequest>) -> Html<String> {
    let is_correct = req.selected_answer.trim() == req.correct_answer.trim();
    Html(fragments::quiz_feedback(
        is_correct,
        &req.correct_answer,
        &req.explanation,
    ))
}
