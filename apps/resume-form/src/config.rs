use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables.
/// Every variable is optional; command-line flags take precedence.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("RESUME_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Picks the URL to post to: the `--api-url` flag if given, else the
    /// environment value. Only the winner is validated.
    pub fn resolve_api_url(&self, flag: Option<String>) -> Result<String> {
        let url = flag.unwrap_or_else(|| self.api_url.clone());
        validate_api_url(&url)?;
        Ok(url)
    }
}

/// Checks that `url` is an absolute http(s) URL the form can be posted to.
pub fn validate_api_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("API URL '{url}' must be a valid URL"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("API URL must use http or https, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(api_url: &str) -> Config {
        Config {
            api_url: api_url.to_string(),
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_flag_overrides_invalid_env_url() {
        let config = config_with("not a url");
        assert_eq!(
            config
                .resolve_api_url(Some("http://127.0.0.1:9000".to_string()))
                .unwrap(),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn test_env_url_used_and_checked_without_flag() {
        assert_eq!(
            config_with("https://resume.example.com").resolve_api_url(None).unwrap(),
            "https://resume.example.com"
        );
        assert!(config_with("not a url").resolve_api_url(None).is_err());
    }

    #[test]
    fn test_invalid_flag_rejected() {
        assert!(config_with(DEFAULT_API_URL)
            .resolve_api_url(Some("ftp://example.com".to_string()))
            .is_err());
    }

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_api_url("http://localhost:8000").is_ok());
        assert!(validate_api_url("https://resume.example.com/app/").is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(validate_api_url("/generate").is_err());
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = validate_api_url("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }
}
