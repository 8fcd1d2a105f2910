//! Low-level HTTP client for the provider adapters.
//!
//! One outbound POST per completion, bounded by the configured timeout, no
//! retries. Transport failures, upstream HTTP errors, and unexpected envelope
//! shapes map to distinct error variants.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CramlyError, Result};
use crate::llm::provider::LlmBackend;

pub struct LlmApiClient {
    http: reqwest::Client,
    backend: LlmBackend,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmApiClient {
    pub fn new(
        backend: LlmBackend,
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CramlyError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            backend,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Send the prompts and return the assistant's text content.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        json_output: bool,
    ) -> Result<String> {
        let response = match self.backend {
            LlmBackend::Gemini => {
                let url = format!(
                    "{}/models/{}:generateContent?key={}",
                    self.base_url, self.model, self.api_key
                );
                let body = gemini_request_body(system_prompt, user_prompt, json_output);
                self.http.post(&url).json(&body).send().await
            }
            LlmBackend::OpenAi => {
                let url = format!("{}/chat/completions", self.base_url);
                let body =
                    openai_request_body(&self.model, system_prompt, user_prompt, json_output);
                self.http
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .json(&body)
                    .send()
                    .await
            }
        };

        let response = response.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CramlyError::Upstream {
                status: status.as_u16(),
                message: upstream_error_detail(&body),
            });
        }

        match self.backend {
            LlmBackend::Gemini => {
                let envelope: GeminiResponse = response
                    .json()
                    .await
                    .map_err(|e| CramlyError::MalformedResponse(e.to_string()))?;
                extract_gemini_text(envelope)
            }
            LlmBackend::OpenAi => {
                let envelope: ChatResponse = response
                    .json()
                    .await
                    .map_err(|e| CramlyError::MalformedResponse(e.to_string()))?;
                extract_openai_text(envelope)
            }
        }
    }
}

fn transport_error(err: reqwest::Error) -> CramlyError {
    if err.is_timeout() {
        CramlyError::Network("request to AI service timed out".to_string())
    } else {
        CramlyError::Network(err.to_string())
    }
}

/// Pull the provider's own error message out of a non-2xx body when it is
/// parseable, otherwise return the raw body.
fn upstream_error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

// --- Gemini payload and envelope ---

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiTurn<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiInstruction<'a>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiTurn<'a> {
    role: &'a str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiInstruction<'a> {
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    response_mime_type: &'static str,
}

fn gemini_request_body<'a>(
    system_prompt: &'a str,
    user_prompt: &'a str,
    json_output: bool,
) -> GeminiRequest<'a> {
    GeminiRequest {
        contents: vec![GeminiTurn {
            role: "user",
            parts: vec![GeminiTextPart { text: user_prompt }],
        }],
        system_instruction: GeminiInstruction {
            parts: vec![GeminiTextPart {
                text: system_prompt,
            }],
        },
        generation_config: json_output.then_some(GeminiGenerationConfig {
            response_mime_type: "application/json",
        }),
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: String,
}

fn extract_gemini_text(envelope: GeminiResponse) -> Result<String> {
    let candidate = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| CramlyError::MalformedResponse("no candidates in reply".to_string()))?;
    let part = candidate
        .content
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| CramlyError::MalformedResponse("no parts in candidate".to_string()))?;
    Ok(part.text)
}

// --- OpenAI-compatible chat payload and envelope ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessageRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessageRef<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

fn openai_request_body<'a>(
    model: &'a str,
    system_prompt: &'a str,
    user_prompt: &'a str,
    json_output: bool,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessageRef {
                role: "system",
                content: system_prompt,
            },
            ChatMessageRef {
                role: "user",
                content: user_prompt,
            },
        ],
        response_format: json_output.then_some(ResponseFormat {
            format_type: "json_object",
        }),
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

fn extract_openai_text(envelope: ChatResponse) -> Result<String> {
    let choice = envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CramlyError::MalformedResponse("no choices in reply".to_string()))?;
    Ok(choice.message.content)
}
