use serde::Deserialize;
use crate::error::{Result, AppError};
use std::fmt;
use std::str::FromStr;
use config::{Config as ConfigLoader, File, Environment as EnvSource};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Named deployment target of the OANDA API.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    #[default]
    Practice,
    Live,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api-sandbox.oanda.com",
            Environment::Practice => "https://api-fxpractice.oanda.com",
            Environment::Live => "https://api-fxtrade.oanda.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Practice => "practice",
            Environment::Live => "live",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "practice" => Ok(Environment::Practice),
            "live" => Ok(Environment::Live),
            other => Err(AppError::Config(format!("Unknown environment '{}'", other))),
        }
    }
}

/// How request bodies (order placement) are encoded.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Form,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    // Empty is accepted here; requests fail until a token is set.
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Replaces the environment's base URL when set.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub body_encoding: BodyEncoding,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>, environment: Environment) -> Self {
        Self {
            access_token: access_token.into(),
            environment,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            base_url: None,
            body_encoding: BodyEncoding::Form,
            log_level: default_log_level(),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_body_encoding(mut self, body_encoding: BodyEncoding) -> Self {
        self.body_encoding = body_encoding;
        self
    }

    /// Loads defaults, then `oanda.toml` if present, then `OANDA_*` environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let loader = ConfigLoader::builder()
            .set_default("environment", Environment::default().as_str())?
            .set_default("timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("body_encoding", "form")?
            .set_default("log_level", "info")?
            .add_source(File::with_name("oanda").required(false))
            .add_source(EnvSource::with_prefix("OANDA").try_parsing(true))
            .build()?;

        let config: Self = loader.try_deserialize()?;
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/'),
            None => self.environment.base_url(),
        }
    }

    /// Trimmed token, `None` when unset or blank.
    pub fn access_token(&self) -> Option<&str> {
        Some(self.access_token.trim()).filter(|t| !t.is_empty())
    }

    /// Request timeout; `0` falls back to [`DEFAULT_TIMEOUT_MS`].
    pub fn effective_timeout_ms(&self) -> u64 {
        match self.timeout_ms {
            0 => DEFAULT_TIMEOUT_MS,
            ms => ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_table() {
        assert_eq!(Environment::Sandbox.base_url(), "https://api-sandbox.oanda.com");
        assert_eq!(Environment::Practice.base_url(), "https://api-fxpractice.oanda.com");
        assert_eq!(Environment::Live.base_url(), "https://api-fxtrade.oanda.com");
        assert_eq!(Environment::default(), Environment::Practice);
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("LIVE".parse::<Environment>().unwrap(), Environment::Live);
        assert_eq!(" sandbox ".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = ClientConfig::new("token", Environment::Live);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.base_url(), "https://api-fxtrade.oanda.com");
        assert_eq!(config.body_encoding, BodyEncoding::Form);

        let config = config
            .with_base_url("http://127.0.0.1:8080/")
            .with_timeout_ms(500)
            .with_body_encoding(BodyEncoding::Json);
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.body_encoding, BodyEncoding::Json);
    }

    #[test]
    fn test_access_token() {
        assert_eq!(ClientConfig::new(" abc ", Environment::Practice).access_token(), Some("abc"));
        assert_eq!(ClientConfig::new("", Environment::Practice).access_token(), None);
        assert_eq!(ClientConfig::new("   ", Environment::Practice).access_token(), None);
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let config = ClientConfig::new("token", Environment::Practice).with_timeout_ms(0);
        assert_eq!(config.effective_timeout_ms(), DEFAULT_TIMEOUT_MS);

        let config = config.with_timeout_ms(750);
        assert_eq!(config.effective_timeout_ms(), 750);
    }
}
