pub const BASE_URL: &str = "https://api.tavus.io";
pub const EMBED_URL: &str = "https://embed.tavus.io";

pub const API_KEY_HEADER: &str = "x-api-key";
