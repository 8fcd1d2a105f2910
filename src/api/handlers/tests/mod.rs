
use crate::api::state::AppState;
use crate::config::{Config, LlmConfig, ServerConfig};

/// Router state with no credential configured: AI-calling endpoints must
/// fail before any network I/O, everything else must work.
pub(crate) fn state_without_credential() -> AppState {
    AppState::new(Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        llm: LlmConfig {
            api_key: None,
            base_url: None,
            tutor_model: "gemini/gemini-1.5-flash-latest".to_string(),
            quiz_model: "gemini/gemini-1.5-flash-latest".to_string(),
            timeout_secs: 45,
        },
    })
}

pub(crate) async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
