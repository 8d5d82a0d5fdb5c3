use crate::config::Config;
use crate::errors::PredictionFailure;
use crate::models::{PredictionRequest, ScoringReply};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

/// Path of the scoring endpoint, relative to the configured base URL.
pub const PREDICT_PATH: &str = "/predict";

/// The external scorer: accepts a lead, answers with a label or fails.
#[async_trait]
pub trait LeadScorer: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<ScoringReply, PredictionFailure>;
}

/// HTTP client for the scoring service.
#[derive(Clone)]
pub struct ScoringClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScoringClient {
    /// Creates a new `ScoringClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the scoring service, without `/predict`.
    /// * `timeout` - Upper bound for one request, connect included.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create scoring client: {}", e))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.scoring_base_url.clone(),
            Duration::from_secs(config.scoring_timeout_secs),
        )
    }

    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base_url, PREDICT_PATH)
    }
}

#[async_trait]
impl LeadScorer for ScoringClient {
    /// Sends one lead to the scorer. No retries.
    async fn predict(&self, request: &PredictionRequest) -> Result<ScoringReply, PredictionFailure> {
        let url = self.predict_url();
        tracing::info!(
            "Sending lead with {} attributes to scorer: {}",
            request.data.len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Scoring request failed: {}", e);
                PredictionFailure::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Scorer returned error {}: {}", status, error_text);
            return Err(PredictionFailure::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await.map_err(|e| {
            PredictionFailure::MalformedResponse(format!("failed to read body: {}", e))
        })?;
        tracing::debug!("Scorer response: {} bytes", body.len());

        let reply: ScoringReply = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unexpected scorer response format: {}", body);
            PredictionFailure::MalformedResponse(e.to_string())
        })?;

        tracing::info!("✓ Scorer predicted '{}'", reply.prediction);
        Ok(reply)
    }
}
