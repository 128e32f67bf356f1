//! Google Gemini `generateContent` client used as the default `TextClassifier`.

use super::classifier::TextClassifier;
use crate::config::ClassifierConfig;
use crate::error::ResolutionError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiClassifier {
    config: ClassifierConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

impl GeminiClassifier {
    /// Creates a client. Fails with `MissingCredential` when no API key is configured.
    pub fn new(config: ClassifierConfig) -> Result<Self, ResolutionError> {
        if !config.has_credential() {
            return Err(ResolutionError::MissingCredential);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ResolutionError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Creates a client from `ClassifierConfig::from_env`.
    pub fn from_env() -> Result<Self, ResolutionError> {
        Self::new(ClassifierConfig::from_env())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            }),
        }
    }
}

/// Extracts the answer text from a raw `generateContent` response body.
///
/// A body that is not valid JSON or carries no candidate is malformed. A
/// candidate without text is a valid, empty answer.
pub fn parse_generate_response(body: &str) -> Result<String, ResolutionError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ResolutionError::InvalidResponse(e.to_string()))?;

    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| ResolutionError::InvalidResponse("no candidates in response".to_string()))?;

    if let Some(usage) = &response.usage_metadata {
        debug!(
            prompt_tokens = ?usage.prompt_token_count,
            answer_tokens = ?usage.candidates_token_count,
            "classifier usage"
        );
    }
    if let Some(reason) = &candidate.finish_reason {
        debug!(finish_reason = %reason, "classifier finished");
    }

    Ok(candidate
        .content
        .iter()
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect())
}

#[async_trait]
impl TextClassifier for GeminiClassifier {
    async fn classify(&self, prompt: &str) -> Result<String, ResolutionError> {
        debug!(
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "sending classification request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolutionError::Timeout(self.config.timeout())
                } else {
                    ResolutionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolutionError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "classifier request failed");
            return Err(ResolutionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let answer = parse_generate_response(&body)?;
        info!(model = %self.config.model, answer = %answer.trim(), "classifier answered");
        Ok(answer)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
