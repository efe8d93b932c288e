//! Client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// How `list_servers` treats raw mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListRawPolicy {
    /// Filter the `vs` map even in raw mode; the raw body is only returned
    /// when `vs` is missing
    #[default]
    FilterWhenPresent,
    /// Raw mode always returns the body unmodified
    Passthrough,
}

/// Connection settings for one panel account
///
/// Values are not validated; a malformed URL or bad credentials only show up
/// when a request is made.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the end-user panel, e.g. `https://panel.example.com:4083`
    pub api: String,
    /// API key
    pub key: String,
    /// API password
    pub secret: String,
    /// Return the panel's bodies unmodified
    #[serde(default)]
    pub raw: bool,
    /// Raw handling of `list_servers`
    #[serde(default)]
    pub list_raw: ListRawPolicy,
}

impl ClientConfig {
    /// Create a config in normalized mode
    pub fn new(api: impl Into<String>, key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            key: key.into(),
            secret: secret.into(),
            raw: false,
            list_raw: ListRawPolicy::default(),
        }
    }

    /// Set raw mode
    #[must_use]
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Set the raw handling of `list_servers`
    #[must_use]
    pub fn list_raw(mut self, policy: ListRawPolicy) -> Self {
        self.list_raw = policy;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api", &self.api)
            .field("key", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("raw", &self.raw)
            .field("list_raw", &self.list_raw)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "api": "https://panel.example.com:4083",
            "key": "k",
            "secret": "s"
        }))
        .unwrap();
        assert!(!config.raw);
        assert_eq!(config.list_raw, ListRawPolicy::FilterWhenPresent);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = ClientConfig::new("https://panel", "apikey123", "hunter2");
        let debug = format!("{config:?}");
        assert!(!debug.contains("apikey123"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("https://panel"));
    }

    #[test]
    fn test_list_raw_policy_names() {
        let policy: ListRawPolicy = serde_json::from_str("\"passthrough\"").unwrap();
        assert_eq!(policy, ListRawPolicy::Passthrough);
    }
}
