use std::sync::Arc;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{CramlyError, Result};
use crate::llm::api::LlmApiClient;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Closed set of provider adapters. Each backend has its own request payload
/// and response envelope shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    Gemini,
    OpenAi,
}

impl LlmBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

/// A configured completion provider for one task (tutoring or quiz
/// generation). Constructed once at startup from the immutable config and
/// cloned into each request handler.
#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    model: String,
    config: Arc<LlmConfig>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig, model_id: &str) -> Self {
        let (provider, model) = parse_llm_provider_model(model_id);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAi,
            _ => LlmBackend::Gemini,
        };

        Self {
            backend,
            model: model.to_string(),
            config: Arc::new(config.clone()),
        }
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn base_url(&self) -> &str {
        if let Some(base_url) = self.config.base_url.as_deref() {
            return base_url;
        }
        match self.backend {
            LlmBackend::Gemini => GEMINI_BASE_URL,
            LlmBackend::OpenAi => OPENAI_BASE_URL,
        }
    }

    /// Single-shot completion: send the prompts, return the assistant's text.
    ///
    /// Fails with a configuration error before any network I/O when no API
    /// key is present.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_output: bool,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CramlyError::Config("LLM API key is not configured".to_string()))?;

        let client = LlmApiClient::new(
            self.backend.clone(),
            self.base_url(),
            api_key,
            &self.model,
            self.config.timeout_secs,
        )?;
        client.complete(system_prompt, user_prompt, json_output).await
    }
}
