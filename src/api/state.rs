use std::sync::Arc;

use crate::config::Config;
use crate::llm::LlmProvider;

/// Shared handler state: the immutable startup configuration and one
/// completion provider per task. Cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tutor: LlmProvider,
    pub quiz: LlmProvider,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let tutor = LlmProvider::new(&config.llm, &config.llm.tutor_model);
        let quiz = LlmProvider::new(&config.llm, &config.llm.quiz_model);
        Self {
            config: Arc::new(config),
            tutor,
            quiz,
        }
    }
}
