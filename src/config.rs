use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub default_page_size: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
            default_page_size: 5,
        }
    }

    /// Reads `API_*` variables, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup("API_BASE_URL")
            .ok_or_else(|| anyhow::anyhow!("API_BASE_URL is not set"))?;
        let token = lookup("API_TOKEN").filter(|t| !t.trim().is_empty());
        let timeout = Duration::from_secs(
            lookup("API_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        );
        let default_page_size = lookup("API_DEFAULT_PAGE_SIZE")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);
        Ok(Self {
            base_url,
            token,
            timeout,
            default_page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn requires_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
    }

    #[test]
    fn applies_defaults() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("API_BASE_URL", "http://localhost:8080/api/v1"),
            ("API_TOKEN", " "),
            ("API_DEFAULT_PAGE_SIZE", "0"),
        ]))
        .unwrap();
        assert_eq!(cfg.token, None);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.default_page_size, 5);
    }

    #[test]
    fn reads_overrides() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("API_BASE_URL", "https://ojt.example.com"),
            ("API_TOKEN", "abc"),
            ("API_TIMEOUT_SECS", "5"),
            ("API_DEFAULT_PAGE_SIZE", "10"),
        ]))
        .unwrap();
        assert_eq!(cfg.token.as_deref(), Some("abc"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.default_page_size, 10);
    }
}
