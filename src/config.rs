use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

pub const DEFAULT_MODEL: &str = "gemini/gemini-1.5-flash-latest";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// LLM configuration shared by the tutoring and quiz tasks.
///
/// `api_key` is optional at startup on purpose: the server boots without it
/// and each AI-calling request fails with a configuration error until the
/// operator sets `LLM_API_KEY`.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub tutor_model: String,
    pub quiz_model: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let tutor_model = env::var("TUTOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let quiz_model = env::var("QUIZ_MODEL").unwrap_or_else(|_| tutor_model.clone());

        Self {
            server: ServerConfig {
                host: env::var("CRAMLY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CRAMLY_PORT", 3000),
            },
            llm: LlmConfig {
                api_key: env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: env::var("LLM_BASE_URL").ok(),
                tutor_model,
                quiz_model,
                timeout_secs: parse_env_or("LLM_TIMEOUT", 45),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers, each with its own request/response shape.
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["gemini", "openai"];

/// Parse a model name into a (provider, model) tuple.
///
/// Examples:
/// - "gemini/gemini-1.5-flash-latest" -> ("gemini", "gemini-1.5-flash-latest")
/// - "openai/gpt-4o-mini" -> ("openai", "gpt-4o-mini")
/// - "gemini-1.5-pro" -> ("gemini", "gemini-1.5-pro")
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Bare model names default to the Gemini shape
    ("gemini", model)
}
