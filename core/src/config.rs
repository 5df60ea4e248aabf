//! Client configuration.
//!
//! `ClientConfig` is a plain value: build it in code with [`ClientConfig::new`]
//! or deserialize it from whatever format the host application uses. Loading
//! it from files or the environment is left to the caller.

use std::fmt;

use serde::Deserialize;

use crate::error::ShortenError;

/// API version string for the v3 endpoints.
pub const V3: &str = "v3";

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "api-ssl.bitly.com";

#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    pub access_token: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_api_version() -> String {
    V3.to_string()
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            host: default_host(),
            api_version: default_api_version(),
            access_token: access_token.into(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Rejects configurations that could never authenticate.
    pub fn validate(&self) -> Result<(), ShortenError> {
        if self.access_token.is_empty() {
            return Err(ShortenError::MissingAccessToken);
        }
        Ok(())
    }
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.host, "api-ssl.bitly.com");
        assert_eq!(config.api_version, "v3");
        assert_eq!(config.access_token, "token");
    }

    #[test]
    fn builders_override_defaults() {
        let config = ClientConfig::new("token")
            .with_host("localhost:8080")
            .with_api_version("v4");
        assert_eq!(config.host, "localhost:8080");
        assert_eq!(config.api_version, "v4");
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let config: ClientConfig = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("abc"));
    }

    #[test]
    fn deserialize_requires_token() {
        let result: Result<ClientConfig, _> = serde_json::from_str(r#"{"host":"example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_token_fails_validation() {
        let err = ClientConfig::new("").validate().unwrap_err();
        assert!(matches!(err, ShortenError::MissingAccessToken));
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
