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
pub struct LearnRequest {
    pub topic: String,
}

/// Tutoring pipeline: prompt the model with the topic, strip button tags,
/// render the markdown, and return the chat-turn fragment.
pub async fn learn(
    State(state): State<AppState>,
    Form(req): Form<LearnRequest>,
) -> Result<Html<String>> {
    tracing::info!(topic = %req.topic, "learn request");

    let raw = state
        .tutor
        .complete(prompts::TUTOR_SYSTEM_PROMPT, &req.topic, false)
        .await?;
    let parsed = reply::parse_buttons(&raw);
    let answer_html = reply::render_markdown(&parsed.text);

    Ok(Html(fragments::chat_turn(
        &req.topic,
        &answer_html,
        &parsed.buttons,
    )))
}
