mod client;

pub use client::{Client, Config, ConfigBuilder, Stats};
pub use persona_types as types;
pub use reqwest::Url;

use anyhow::Result;
use async_trait::async_trait;
use types::{EmbedParams, StartPersonaRequest, StartPersonaResponse};

/// The calls a front end makes against the persona provider. Implemented by
/// [`Client`]; adapters are generic over it so they can be tested with a mock.
#[async_trait]
pub trait PersonaHttp: Send + Sync {
    async fn start_persona(
        &self,
        persona_id: &str,
        request: &StartPersonaRequest,
    ) -> Result<StartPersonaResponse>;

    async fn end_conversation(&self, conversation_id: &str) -> Result<()>;

    fn embed_url(&self, params: &EmbedParams) -> Result<Url>;
}

#[async_trait]
impl PersonaHttp for Client {
    async fn start_persona(
        &self,
        persona_id: &str,
        request: &StartPersonaRequest,
    ) -> Result<StartPersonaResponse> {
        Client::start_persona(self, persona_id, request).await
    }

    async fn end_conversation(&self, conversation_id: &str) -> Result<()> {
        Client::end_conversation(self, conversation_id).await
    }

    fn embed_url(&self, params: &EmbedParams) -> Result<Url> {
        Client::embed_url(self, params)
    }
}
