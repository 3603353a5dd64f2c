use std::env;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_STORYBLOK_MAPI_URL: &str = "https://mapi.storyblok.com/v1";

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// Gemini API key. Generation routes fail with a configuration error when absent.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    /// Model used when a request does not name one
    pub gemini_model: String,
    pub storyblok_mapi_url: String,
    /// Management token used when a request carries none
    pub storyblok_access_token: Option<String>,
    /// Space used when a request carries none
    pub storyblok_space_id: Option<String>,
    /// Timeout for outbound Gemini and Storyblok calls
    pub http_timeout_secs: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: parse_or("PORT", 8080),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            storyblok_mapi_url: env::var("STORYBLOK_MAPI_URL")
                .unwrap_or_else(|_| DEFAULT_STORYBLOK_MAPI_URL.to_string()),
            storyblok_access_token: non_empty("STORYBLOK_ACCESS_TOKEN"),
            storyblok_space_id: non_empty("STORYBLOK_SPACE_ID"),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", 120),
            rate_limit_per_second: parse_or("RATE_LIMIT_PER_SECOND", 2),
            rate_limit_burst: parse_or("RATE_LIMIT_BURST", 10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            gemini_api_key: None,
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            storyblok_mapi_url: DEFAULT_STORYBLOK_MAPI_URL.to_string(),
            storyblok_access_token: None,
            storyblok_space_id: None,
            http_timeout_secs: 120,
            rate_limit_per_second: 2,
            rate_limit_burst: 10,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_invalid() {
        assert_eq!(parse_or("BLOKPILOT_TEST_UNSET_PORT", 8080u16), 8080);

        env::set_var("BLOKPILOT_TEST_BAD_PORT", "not-a-number");
        assert_eq!(parse_or("BLOKPILOT_TEST_BAD_PORT", 8080u16), 8080);

        env::set_var("BLOKPILOT_TEST_GOOD_PORT", "9090");
        assert_eq!(parse_or("BLOKPILOT_TEST_GOOD_PORT", 8080u16), 9090);
    }

    #[test]
    fn non_empty_ignores_blank_values() {
        env::set_var("BLOKPILOT_TEST_BLANK_KEY", "  ");
        assert!(non_empty("BLOKPILOT_TEST_BLANK_KEY").is_none());

        env::set_var("BLOKPILOT_TEST_SET_KEY", "abc");
        assert_eq!(non_empty("BLOKPILOT_TEST_SET_KEY").as_deref(), Some("abc"));
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.http_timeout_secs, 120);
        assert!(config.gemini_api_key.is_none());
    }
}
