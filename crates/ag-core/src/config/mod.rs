//! Application configuration DTO.
//!
//! Provides TOML -> DTO mapping only. Absent keys fall back to the values of
//! [`AppConfig::default`]; an empty `storage.path` means "use the platform
//! data directory", which is resolved by the infrastructure layer.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/auth";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the auth API, without trailing slash.
    pub api_base_url: String,

    /// Per-request timeout of the HTTP client.
    pub request_timeout_secs: u64,

    /// Delay between a field losing focus and its validation.
    pub debounce_ms: u64,

    /// Key-value storage file (empty = platform default).
    pub storage_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            storage_path: PathBuf::new(),
        }
    }
}

impl AppConfig {
    /// Create AppConfig from TOML value
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        let non_negative = |name: &str, key: &str, default: u64| -> anyhow::Result<u64> {
            match section(name, key).and_then(|v| v.as_integer()) {
                Some(value) => u64::try_from(value)
                    .map_err(|_| anyhow::anyhow!("{name}.{key} must not be negative: {value}")),
                None => Ok(default),
            }
        };

        Ok(Self {
            api_base_url: section("api", "base_url")
                .and_then(|v| v.as_str())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            request_timeout_secs: non_negative(
                "api",
                "request_timeout_secs",
                defaults.request_timeout_secs,
            )?,
            debounce_ms: non_negative("forms", "debounce_ms", defaults.debounce_ms)?,
            storage_path: section("storage", "path")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_reads_all_sections() {
        let value: toml::Value = toml::from_str(
            r#"
            [api]
            base_url = "https://auth.example.com/api/auth/"
            request_timeout_secs = 3

            [forms]
            debounce_ms = 250

            [storage]
            path = "/tmp/authgate/store.json"
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.api_base_url, "https://auth.example.com/api/auth");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/authgate/store.json"));
    }

    #[test]
    fn from_toml_falls_back_to_defaults() {
        let value: toml::Value = toml::from_str("[api]\n").unwrap();
        assert_eq!(AppConfig::from_toml(&value).unwrap(), AppConfig::default());
    }

    #[test]
    fn from_toml_rejects_negative_numbers() {
        let value: toml::Value = toml::from_str("[forms]\ndebounce_ms = -1\n").unwrap();
        assert!(AppConfig::from_toml(&value).is_err());
    }
}
