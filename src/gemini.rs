//! Gemini providers for embedding and answer generation.
//!
//! Both providers call the Gemini REST API directly with `reqwest`. This
//! module is only available when the `gemini` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{QaError, Result};
use crate::generation::Generator;

/// Base URL of the Gemini REST API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The default embedding model.
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// The default dimensionality for `text-embedding-004`.
const DEFAULT_DIMENSIONS: usize = 768;

/// The default generation model.
const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";

/// Request timeout applied to every API call unless overridden.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn build_client(timeout: Duration) -> std::result::Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Uses `reqwest` to call the `embedContent` and `batchEmbedContents`
/// endpoints directly.
///
/// # Configuration
///
/// - `model` and `dimensions` default to `text-embedding-004` / 768.
/// - `api_key` comes from the constructor or the `GEMINI_API_KEY`
///   environment variable.
/// - Every request carries a hard timeout so no call blocks indefinitely.
///
/// # Example
///
/// ```rust,ignore
/// use pdf_qa::gemini::GeminiEmbeddingProvider;
///
/// let provider = GeminiEmbeddingProvider::from_env()?;
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct GeminiEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbeddingProvider {
    /// Create a new provider with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new provider with an explicit request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(QaError::EmbeddingError {
                provider: "Gemini".into(),
                message: "API key must not be empty".into(),
            });
        }

        let client = build_client(timeout).map_err(|e| QaError::EmbeddingError {
            provider: "Gemini".into(),
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new provider using the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| QaError::EmbeddingError {
            provider: "Gemini".into(),
            message: format!("{API_KEY_ENV} environment variable not set"),
        })?;
        Self::new(api_key)
    }

    /// Set the embedding model and its output dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{GEMINI_BASE_URL}/models/{}:{method}", self.model)
    }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct EmbedContent<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    content: EmbedContent<'a>,
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedRequest<'a>>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // Only truly empty input is invalid at the API; whitespace-only
        // text (an all-blank chunk window, say) embeds like any other.
        if text.is_empty() {
            return Err(QaError::EmbeddingError {
                provider: "Gemini".into(),
                message: "cannot embed empty text".into(),
            });
        }

        debug!(provider = "Gemini", text_len = text.len(), "embedding single text");

        let model = format!("models/{}", self.model);
        let request_body = EmbedRequest {
            model: &model,
            content: EmbedContent { parts: vec![TextPart { text }] },
        };

        let response = self
            .client
            .post(self.endpoint("embedContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "embedding request failed");
                QaError::EmbeddingError {
                    provider: "Gemini".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            return Err(api_error(response, "Gemini", ErrorKind::Embedding).await);
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse embedding response");
            QaError::EmbeddingError {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embed_response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(position) = texts.iter().position(|t| t.is_empty()) {
            return Err(QaError::EmbeddingError {
                provider: "Gemini".into(),
                message: format!("cannot embed empty text (batch item {position})"),
            });
        }

        debug!(
            provider = "Gemini",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let model = format!("models/{}", self.model);
        let request_body = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedRequest {
                    model: &model,
                    content: EmbedContent { parts: vec![TextPart { text }] },
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.endpoint("batchEmbedContents"))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "batch embedding request failed");
                QaError::EmbeddingError {
                    provider: "Gemini".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            return Err(api_error(response, "Gemini", ErrorKind::Embedding).await);
        }

        let batch_response: BatchEmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse batch embedding response");
            QaError::EmbeddingError {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        if batch_response.embeddings.len() != texts.len() {
            return Err(QaError::EmbeddingError {
                provider: "Gemini".into(),
                message: format!(
                    "API returned {} embeddings for {} inputs",
                    batch_response.embeddings.len(),
                    texts.len()
                ),
            });
        }

        Ok(batch_response.embeddings.into_iter().map(|e| e.values).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Which error kind an API failure should surface as.
enum ErrorKind {
    Embedding,
    Generation,
}

/// Turn a non-success HTTP response into the matching [`QaError`], pulling
/// the message out of the JSON error body when there is one.
async fn api_error(response: reqwest::Response, provider: &str, kind: ErrorKind) -> QaError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail =
        serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error.message).unwrap_or(body);

    error!(provider, %status, "API error");
    let message = format!("API returned {status}: {detail}");
    match kind {
        ErrorKind::Embedding => {
            QaError::EmbeddingError { provider: provider.to_string(), message }
        }
        ErrorKind::Generation => {
            QaError::GenerationError { provider: provider.to_string(), message }
        }
    }
}

// ── Generator implementation ───────────────────────────────────────

/// A [`Generator`] backed by the Gemini `generateContent` API.
///
/// # Configuration
///
/// - `model` defaults to `gemini-1.5-flash`.
/// - `temperature` and `max_output_tokens` are optional and omitted from
///   the request when unset.
/// - `api_key` comes from the constructor or the `GEMINI_API_KEY`
///   environment variable.
///
/// # Example
///
/// ```rust,ignore
/// use pdf_qa::gemini::GeminiGenerator;
///
/// let generator = GeminiGenerator::from_env()?.with_temperature(0.2);
/// let answer = generator.generate("What is a PDF?").await?;
/// ```
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl GeminiGenerator {
    /// Create a new generator with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new generator with an explicit request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(QaError::GenerationError {
                provider: "Gemini".into(),
                message: "API key must not be empty".into(),
            });
        }

        let client = build_client(timeout).map_err(|e| QaError::GenerationError {
            provider: "Gemini".into(),
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_GENERATION_MODEL.into(),
            temperature: None,
            max_output_tokens: None,
        })
    }

    /// Create a new generator using the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| QaError::GenerationError {
            provider: "Gemini".into(),
            message: format!("{API_KEY_ENV} environment variable not set"),
        })?;
        Self::new(api_key)
    }

    /// Set the generation model (e.g. `gemini-1.5-pro`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the number of tokens the model may generate.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Gemini", model = %self.model, prompt_len = prompt.len(), "generating answer");

        let generation_config = if self.temperature.is_some() || self.max_output_tokens.is_some()
        {
            Some(GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            })
        } else {
            None
        };

        let request_body = GenerateRequest {
            contents: vec![RequestContent { role: "user", parts: vec![TextPart { text: prompt }] }],
            generation_config,
        };

        let response = self
            .client
            .post(format!("{GEMINI_BASE_URL}/models/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "generation request failed");
                QaError::GenerationError {
                    provider: "Gemini".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            return Err(api_error(response, "Gemini", ErrorKind::Generation).await);
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse generation response");
            QaError::GenerationError {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        // Safety-blocked or empty responses carry no usable parts.
        let text: String = generate_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(QaError::GenerationError {
                provider: "Gemini".into(),
                message: "response contained no answer text".into(),
            });
        }

        Ok(text)
    }
}
