use crate::util::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_CAPTURE_INTERVAL_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const ENV_API_URL: &str = "EMOTION_API_URL";

/// Base URL of the emotion detection backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(Url);

impl ApiUrl {
    pub fn new(value: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(value.trim())
            .map_err(|e| ConfigError::InvalidApiUrl(value.to_owned(), e))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(ConfigError::UnsupportedScheme(other.to_owned())),
        }
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Joins an absolute API path onto the base, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureInterval {
    pub millis: u64,
}

impl CaptureInterval {
    pub fn new(millis: u64) -> Result<Self, ConfigError> {
        if millis == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self { millis })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl Default for CaptureInterval {
    fn default() -> Self {
        Self {
            millis: DEFAULT_CAPTURE_INTERVAL_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestTimeout {
    pub millis: u64,
}

impl RequestTimeout {
    pub fn new(millis: u64) -> Result<Self, ConfigError> {
        if millis == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { millis })
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self {
            millis: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DetectorConfig {
    pub api_url: ApiUrl,
    pub timeout: RequestTimeout,
    pub retry: RetryConfig,
}

impl DetectorConfig {
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            timeout: RequestTimeout::default(),
            retry: RetryConfig::default(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid api url {0:?}: {1}")]
    InvalidApiUrl(String, url::ParseError),
    #[error("api url scheme must be http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("capture interval must be > 0 ms")]
    ZeroInterval,
    #[error("request timeout must be > 0 ms")]
    ZeroTimeout,
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

/// CLI value, then environment, then `DEFAULT_API_URL`.
pub fn resolve_api_url(cli_value: Option<String>, env: &impl Env) -> Result<ApiUrl, ConfigError> {
    let raw = resolve_string_with_default(cli_value, ENV_API_URL, env, DEFAULT_API_URL);
    ApiUrl::new(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_API_URL, "http://env-host:5000");
        let url = resolve_api_url(Some("https://cli-host".to_owned()), &env).expect("valid url");
        assert_eq!(url.as_url().host_str(), Some("cli-host"));
    }

    #[test]
    fn api_url_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_API_URL, "http://env-host:5000");
        let url = resolve_api_url(None, &env).expect("valid url");
        assert_eq!(url.endpoint("/api/detect"), "http://env-host:5000/api/detect");
    }

    #[test]
    fn api_url_default_when_both_missing() {
        let url = resolve_api_url(None, &MapEnv::default()).expect("valid url");
        assert_eq!(url.as_url().as_str(), "http://localhost:5000/");
        assert_eq!(url.endpoint("api/health"), "http://localhost:5000/api/health");
    }

    #[test]
    fn api_url_keeps_base_path() {
        let url = ApiUrl::new("https://example.com/emotion/").expect("valid url");
        assert_eq!(url.endpoint("/api/detect"), "https://example.com/emotion/api/detect");
    }

    #[test]
    fn api_url_rejects_bad_input() {
        assert!(matches!(
            ApiUrl::new("not a url"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
        assert_eq!(
            ApiUrl::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme("ftp".to_owned()))
        );
    }

    #[test]
    fn zero_durations_rejected() {
        assert_eq!(CaptureInterval::new(0), Err(ConfigError::ZeroInterval));
        assert_eq!(RequestTimeout::new(0), Err(ConfigError::ZeroTimeout));
        assert_eq!(
            CaptureInterval::new(250).expect("nonzero").duration(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn resolve_string_with_default_prefers_cli_then_env() {
        let env = MapEnv::default().with_var("SOME_KEY", "env");
        assert_eq!(
            resolve_string_with_default(Some("cli".to_owned()), "SOME_KEY", &env, "def"),
            "cli"
        );
        assert_eq!(resolve_string_with_default(None, "SOME_KEY", &env, "def"), "env");
        assert_eq!(resolve_string_with_default(None, "OTHER", &env, "def"), "def");
    }
}
