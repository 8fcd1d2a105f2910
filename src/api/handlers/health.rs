use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::llm::LlmProvider;

#[derive(Serialize)]
pub struct LlmStatus {
    pub provider: String,
    pub model: String,
    pub credential_configured: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tutor: LlmStatus,
    pub quiz: LlmStatus,
}

fn llm_status(provider: &LlmProvider) -> LlmStatus {
    LlmStatus {
        provider: provider.backend().name().to_string(),
        model: provider.model_name().to_string(),
        credential_configured: provider.has_credential(),
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tutor: llm_status(&state.tutor),
        quiz: llm_status(&state.quiz),
    })
}
