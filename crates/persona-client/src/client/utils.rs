use crate::client::config::Config;
use crate::client::consts::API_KEY_HEADER;
use persona_types::EmbedParams;
use reqwest::{RequestBuilder, Url};
use secrecy::ExposeSecret;

pub fn start_url(config: &Config, persona_id: &str) -> String {
    format!("{}/v2/personas/{}/start", config.base_url(), persona_id)
}

pub fn end_url(config: &Config, conversation_id: &str) -> String {
    format!("{}/v2/conversations/{}/end", config.base_url(), conversation_id)
}

/// Adds the API key header when the config carries one.
pub fn authorize(request: RequestBuilder, config: &Config) -> RequestBuilder {
    match config.api_key() {
        Some(key) => request.header(API_KEY_HEADER, key.expose_secret()),
        None => request,
    }
}

pub fn build_embed_url(config: &Config, params: &EmbedParams) -> anyhow::Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/persona/{}/replica/{}",
        config.embed_url(),
        params.persona_id(),
        params.replica_id()
    ))?;
    {
        let mut query = url.query_pairs_mut();
        if !params.user_label().is_empty() {
            query.append_pair("user", params.user_label());
        }
        if !params.domain().is_empty() {
            query.append_pair("domain", params.domain());
        }
        for question in params.questions() {
            query.append_pair("question", question);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url)
}
