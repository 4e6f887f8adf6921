// src/generation/client.rs
use crate::config::GeneratorSettings;
use crate::generation::models::{ChatRequest, ChatResponse};
use crate::utils::error::GenerationError;
use reqwest::header;
use std::future::Future;
use std::time::Duration;

const USER_AGENT: &str = concat!("report_assembler/", env!("CARGO_PKG_VERSION"));

/// Something that turns a prompt into generated text.
///
/// The pipeline only sees this trait, so tests can script responses without a
/// running model.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Chat client for an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(settings: &GeneratorSettings) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        // No timeout unless asked for: a full report can take many minutes.
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: settings.ollama_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = self.chat_url();
        tracing::info!("Requesting generation from {} (model {})", url, self.model);
        tracing::debug!("Prompt is {} bytes", prompt.len());

        let response = self
            .http
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&ChatRequest::user_prompt(&self.model, prompt))
            .send()
            .await?; // Propagates reqwest::Error as GenerationError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::NOT_FOUND {
                tracing::warn!("Received 404 - is model '{}' pulled on the server?", self.model);
            }
            return Err(GenerationError::Http(status));
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let content = parsed.content().unwrap_or_default();
        if content.trim().is_empty() {
            tracing::error!("Generation service returned an empty reply");
            return Err(GenerationError::EmptyResponse);
        }

        tracing::info!(
            "Received {} bytes of generated text (done: {}, duration: {:?}ns)",
            content.len(),
            parsed.done,
            parsed.total_duration
        );
        Ok(content.to_string())
    }
}
