//! Chat-completion client for AI-powered project generation.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Error)]
pub enum GroqApiError {
    #[error("missing api key: GROQ_API_KEY is not set")]
    MissingApiKey,
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("json error: {0}")]
    Serde(String),
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the completion endpoint
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Per-client configuration, passed in at construction so the client stays
/// testable in isolation. The API key is optional: its absence means
/// "remote generation unavailable", surfaced as a typed error at call time.
#[derive(Debug, Clone)]
pub struct GroqApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GroqApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GROQ_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GroqApiConfig {
    /// Read credentials and model overrides from the environment.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let model = std::env::var("GROQ_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            api_key,
            model,
            ..Self::default()
        }
    }
}

/// Chat-completion API client
#[derive(Debug, Clone)]
pub struct GroqApiClient {
    http: Client,
    config: GroqApiConfig,
}

impl GroqApiClient {
    pub fn new(config: GroqApiConfig) -> Result<Self, GroqApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("codegenesis/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GroqApiError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, GroqApiError> {
        Self::new(GroqApiConfig::from_env())
    }

    /// Send one completion request and return the first choice's message
    /// content. No retries happen here: whether a failure routes to
    /// fallback content is the caller's decision.
    pub async fn complete(&self, messages: Vec<Message>) -> Result<String, GroqApiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GroqApiError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let res = self
            .http
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GroqApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = res
            .json::<ChatResponse>()
            .await
            .map_err(|e| GroqApiError::Serde(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GroqApiError::Serde("no message content in response".to_string()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GroqApiError {
    if e.is_timeout() {
        GroqApiError::Timeout
    } else {
        GroqApiError::Transport(e.to_string())
    }
}
