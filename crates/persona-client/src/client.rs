use crate::types::{EmbedParams, StartPersonaRequest, StartPersonaResponse};
use anyhow::{Context, Result};
use reqwest::Url;
use std::sync::{Arc, Mutex};

mod config;
mod consts;
mod stats;
mod utils;

pub use config::{Config, ConfigBuilder};
pub use stats::Stats;

// Holds the HTTP connection pool, the configuration, and usage stats guarded by a Mutex.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<Config>,
    stats: Arc<Mutex<Stats>>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
            stats: Arc::new(Mutex::new(Stats::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Asks the provider to start `persona_id` with the given replica and context.
    pub async fn start_persona(
        &self,
        persona_id: &str,
        request: &StartPersonaRequest,
    ) -> Result<StartPersonaResponse> {
        let url = utils::start_url(&self.config, persona_id);
        tracing::debug!("POST {}", url);

        let result = self.send_start(&url, request).await;
        if result.is_ok() {
            self.record(Stats::record_started);
        } else {
            self.record(Stats::record_failed);
        }
        result
    }

    async fn send_start(
        &self,
        url: &str,
        request: &StartPersonaRequest,
    ) -> Result<StartPersonaResponse> {
        let response = utils::authorize(self.http.post(url), &self.config)
            .json(request)
            .send()
            .await
            .context("Failed to reach persona provider")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Failed to initialize persona: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            ));
        }

        let body = response
            .text()
            .await
            .context("Failed to read persona start response")?;
        if body.trim().is_empty() {
            return Ok(StartPersonaResponse::default());
        }
        let parsed = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse persona start response: {body}"))?;
        tracing::debug!("Persona start response: {:?}", parsed);
        Ok(parsed)
    }

    /// Ends a conversation previously started with `start_persona`.
    pub async fn end_conversation(&self, conversation_id: &str) -> Result<()> {
        let url = utils::end_url(&self.config, conversation_id);
        tracing::debug!("POST {}", url);

        let response = utils::authorize(self.http.post(&url), &self.config)
            .send()
            .await
            .context("Failed to reach persona provider")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Failed to end conversation {}: {}",
                conversation_id,
                status.canonical_reason().unwrap_or(status.as_str())
            ));
        }
        self.record(Stats::record_ended);
        Ok(())
    }

    /// Address of the interactive persona view for `params`.
    pub fn embed_url(&self, params: &EmbedParams) -> Result<Url> {
        utils::build_embed_url(&self.config, params)
    }

    // Return a snapshot of the usage counters.
    pub fn stats(&self) -> Result<Stats> {
        if let Ok(stats_guard) = self.stats.lock() {
            Ok(stats_guard.clone())
        } else {
            Err(anyhow::anyhow!("failed to get stats"))
        }
    }

    fn record(&self, update: impl FnOnce(&mut Stats)) {
        if let Ok(mut stats_guard) = self.stats.lock() {
            update(&mut stats_guard);
        } else {
            tracing::error!("failed to update stats");
        }
    }
}
