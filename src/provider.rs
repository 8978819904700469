//! Typed client for the generative AI providers.
//!
//! One request per suggestion, no retries: either a schema-constrained
//! Gemini `generateContent` call or a JSON-mode chat completion against any
//! OpenAI-compatible endpoint. Both must come back as a JSON object with
//! `xpath`, `cssSelector`, and `explanation` (plus the optional fields);
//! code fences around the body are tolerated.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::settings::{
    ENV_GEMINI_API_KEY, ENV_OPENAI_API_KEY, Provider, Settings,
};
use crate::types::SelectorSuggestion;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_PROMPT: &str = "You generate XPath and CSS selectors for web automation. \
     Output ONLY a JSON object (no markdown fences, no prose) with keys \
     xpath, cssSelector, explanation and optionally idSelector, nameSelector, iframeWarning.";

/// Fully resolved provider configuration. Construction fails with a
/// descriptive error when credentials are missing, before any network call.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl ProviderConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let env_var = match settings.provider {
            Provider::Gemini => ENV_GEMINI_API_KEY,
            Provider::OpenaiCompatible => ENV_OPENAI_API_KEY,
        };
        let api_key = settings
            .resolved_api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider {:?}. \
                     Set one with `selectorprobe settings set --api-key <KEY>` \
                     or the {} environment variable",
                    settings.provider,
                    env_var
                )
            })?;

        let base_url = settings.resolved_base_url().unwrap_or_else(|| {
            match settings.provider {
                Provider::Gemini => DEFAULT_GEMINI_BASE_URL,
                Provider::OpenaiCompatible => DEFAULT_OPENAI_BASE_URL,
            }
            .to_string()
        });

        let model = settings.resolved_model().unwrap_or_else(|| {
            match settings.provider {
                Provider::Gemini => DEFAULT_GEMINI_MODEL,
                Provider::OpenaiCompatible => DEFAULT_OPENAI_MODEL,
            }
            .to_string()
        });

        Ok(ProviderConfig {
            provider: settings.provider,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

/// HTTP client for one configured provider
pub struct ProviderClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

// OpenAI-compatible request/response shapes

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseFormat {
    JsonObject,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// Gemini response shape

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: String,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(ProviderClient { client, config })
    }

    /// Issue exactly one generation request and parse the selector pair.
    pub async fn generate(&self, prompt: &str) -> Result<SelectorSuggestion> {
        let content = match self.config.provider {
            Provider::Gemini => self.generate_gemini(prompt).await?,
            Provider::OpenaiCompatible => self.generate_openai(prompt).await?,
        };
        parse_suggestion(&content)
    }

    async fn generate_gemini(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": suggestion_schema(),
            }
        });

        debug!("Requesting suggestion from Gemini model {}", self.config.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the provider (generateContent)")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("provider returned HTTP {}: {}", status, text);
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .context("Malformed provider response (generateContent)")?;
        extract_gemini_text(parsed)
    }

    async fn generate_openai(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let body = ChatRequest {
            model: &self.config.model,
            temperature: 0.2,
            response_format: ResponseFormat::JsonObject,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!("Requesting suggestion from model {}", self.config.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the provider (chat/completions)")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("provider returned HTTP {}: {}", status, text);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Malformed provider response (chat/completions)")?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("provider returned no choices"))
    }
}

/// Response schema constraining the Gemini output to the suggestion shape.
fn suggestion_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "xpath": { "type": "STRING" },
            "cssSelector": { "type": "STRING" },
            "idSelector": { "type": "STRING" },
            "nameSelector": { "type": "STRING" },
            "explanation": { "type": "STRING" },
            "iframeWarning": { "type": "STRING" }
        },
        "required": ["xpath", "cssSelector", "explanation"]
    })
}

fn extract_gemini_text(response: GeminiResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| anyhow::anyhow!("provider returned no candidates"))
}

/// Parse the provider's JSON body into a suggestion, tolerating markdown
/// code fences around it.
fn parse_suggestion(content: &str) -> Result<SelectorSuggestion> {
    let cleaned = strip_code_fences(content);
    serde_json::from_str(cleaned)
        .with_context(|| format!("provider returned unparseable JSON: {}", content))
}

fn strip_code_fences(s: &str) -> &str {
    let s = s.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    if let Some(rest) = s.strip_prefix("```") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    s
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;
