use crate::client::consts::{BASE_URL, EMBED_URL};
use secrecy::SecretString;

pub struct Config {
    base_url: String,
    embed_url: String,
    api_key: Option<SecretString>,
}

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_embed_url(mut self, embed_url: &str) -> Self {
        self.config.embed_url = embed_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.config.api_key = Some(SecretString::from(api_key.to_string()));
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    // No key by default: only a server-side deployment should ever set one.
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            embed_url: EMBED_URL.to_string(),
            api_key: None,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
