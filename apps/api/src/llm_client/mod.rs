/// Text-Generation Gateway — the single point of entry for all LLM calls
/// in Postforge.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All text generation MUST go through this module.
///
/// The gateway tries a fixed ordered list of backing models, one attempt
/// each, before giving up. Deterministic template fallbacks live at the
/// call sites (assembler, meta optimizer) where keyword and company
/// context exist — never here.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Ordered backing-model list. Tried front to back, one attempt per model;
/// the loop is bounded by this list — never infinite retry.
pub const MODEL_FALLBACKS: &[&str] = &["claude-sonnet-4-5", "claude-haiku-4-5"];
const MAX_TOKENS: u32 = 4096;
/// Per-call timeout. A call that exceeds this is treated as a failure and
/// the next model in the list is tried.
const CALL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("All {attempts} backing models failed")]
    Exhausted { attempts: usize },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Generated text plus its derived word count.
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub word_count: usize,
}

/// The text-generation capability consumed by the assembler and the meta
/// optimizer. Carried in `AppState` as `Arc<dyn TextGenerator>` — an
/// explicit constructed instance, no ambient global.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<Generated, GenerationError>;
}

/// Calls the generator and deserializes the text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
    system: &str,
) -> Result<T, GenerationError> {
    let generated = generator.generate(prompt, system).await?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&generated.text);

    serde_json::from_str(text).map_err(GenerationError::Parse)
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ResponseBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The production gateway backed by the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmGateway {
    client: Client,
    api_key: String,
}

impl LlmGateway {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(CALL_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// One attempt against one backing model.
    async fn call_model(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<Generated, GenerationError> {
        let request_body = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response.json().await?;

        debug!(
            "LLM call succeeded: model={}, input_tokens={}, output_tokens={}",
            model, parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        let text = parsed
            .text()
            .ok_or(GenerationError::EmptyContent)?
            .to_string();
        let word_count = text.split_whitespace().count();

        Ok(Generated { text, word_count })
    }
}

#[async_trait]
impl TextGenerator for LlmGateway {
    /// Tries each backing model in `MODEL_FALLBACKS` order until one
    /// succeeds. Exhausting the list returns the last error.
    async fn generate(&self, prompt: &str, system: &str) -> Result<Generated, GenerationError> {
        let mut last_error = GenerationError::Exhausted {
            attempts: MODEL_FALLBACKS.len(),
        };

        for model in MODEL_FALLBACKS {
            match self.call_model(model, prompt, system).await {
                Ok(generated) => return Ok(generated),
                Err(e) => {
                    warn!("Model {model} failed: {e} — trying next in list");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_model_fallback_list_is_bounded_and_nonempty() {
        assert!(!MODEL_FALLBACKS.is_empty());
        assert!(MODEL_FALLBACKS.len() <= 4);
    }

    #[tokio::test]
    async fn test_generate_json_parses_fenced_output() {
        struct Fixed;

        #[async_trait]
        impl TextGenerator for Fixed {
            async fn generate(
                &self,
                _prompt: &str,
                _system: &str,
            ) -> Result<Generated, GenerationError> {
                Ok(Generated {
                    text: "```json\n{\"slug\": \"solar-panels\"}\n```".to_string(),
                    word_count: 2,
                })
            }
        }

        #[derive(Deserialize)]
        struct Out {
            slug: String,
        }

        let out: Out = generate_json(&Fixed, "p", "s").await.unwrap();
        assert_eq!(out.slug, "solar-panels");
    }
}
