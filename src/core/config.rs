//! Client configuration management
//!
//! This module resolves the backend base URL from its layered sources and
//! loads the optional TOML configuration file. Resolution happens once, at
//! startup; the resulting `ClientConfig` is passed explicitly to
//! `ApiClient::new` and never re-read per request.

use crate::core::constants::{DEFAULT_CONFIG_FILE, env};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default logging level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Raw base URL candidates, highest precedence first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSources {
    /// Runtime-injected override (CLI flag or config file)
    pub injected: Option<String>,
    /// Primary environment variable
    pub primary: Option<String>,
    /// Legacy environment variable
    pub legacy: Option<String>,
}

impl EndpointSources {
    /// Read the environment-backed sources from the process environment
    pub fn from_env(injected: Option<String>) -> Self {
        Self::from_lookup(injected, |name| std::env::var(name).ok())
    }

    /// Read the environment-backed sources through `lookup`
    pub fn from_lookup<F>(injected: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            injected,
            primary: lookup(env::BASE_URL),
            legacy: lookup(env::LEGACY_BASE_URL),
        }
    }
}

/// Pick the first non-blank source and normalize it
///
/// Falls back to the empty string, meaning "same origin" (relative URLs).
/// Never fails; the result depends only on `sources`.
pub fn resolve_base_url(sources: &EndpointSources) -> String {
    [&sources.injected, &sources.primary, &sources.legacy]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .map(|value| normalize_base_url(value.as_str()))
        .unwrap_or_default()
}

/// Trim surrounding whitespace and strip exactly one trailing `/`
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
}

/// Contents of the optional `skill-judge.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;

        if config.api.timeout_secs == Some(0) {
            bail!("api.timeout_secs must be greater than zero");
        }

        Ok(config)
    }
}

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL; empty means same-origin relative requests
    pub base_url: String,

    /// Optional transport timeout in seconds; `None` means no timeout
    pub timeout_secs: Option<u64>,

    /// Logging level for the binary's subscriber
    pub log_level: String,
}

impl ClientConfig {
    /// Configuration pointing at `base_url`, with defaults elsewhere
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout_secs: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Combine a parsed config file, a CLI override and the environment
    ///
    /// The CLI override beats `[api].base_url`; together they form the
    /// runtime-injected source ahead of the environment variables.
    pub fn resolve<F>(file: TomlConfig, cli_base_url: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let injected = cli_base_url
            .filter(|value| !value.trim().is_empty())
            .or(file.api.base_url);
        let log_level = file
            .logging
            .level
            .or_else(|| lookup(env::LOG_LEVEL))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let sources = EndpointSources::from_lookup(injected, lookup);

        Self {
            base_url: resolve_base_url(&sources),
            timeout_secs: file.api.timeout_secs,
            log_level,
        }
    }

    /// Load configuration from the environment and the optional config file
    ///
    /// The file path comes from `config_path`, then `SKILL_JUDGE_CONFIG`,
    /// then `skill-judge.toml` in the working directory. Only the last one
    /// may be absent.
    pub fn from_env(cli_base_url: Option<String>, config_path: Option<PathBuf>) -> Result<Self> {
        let explicit = config_path
            .or_else(|| std::env::var(env::CONFIG_PATH).ok().map(PathBuf::from));

        let file = match explicit {
            Some(path) => TomlConfig::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        Ok(Self::resolve(file, cli_base_url, |name| std::env::var(name).ok()))
    }

    pub fn is_same_origin(&self) -> bool {
        self.base_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn sources(
        injected: Option<&str>,
        primary: Option<&str>,
        legacy: Option<&str>,
    ) -> EndpointSources {
        EndpointSources {
            injected: injected.map(String::from),
            primary: primary.map(String::from),
            legacy: legacy.map(String::from),
        }
    }

    #[test]
    fn test_precedence_order() {
        let all = sources(Some("https://inj"), Some("https://primary"), Some("https://legacy"));
        assert_eq!(resolve_base_url(&all), "https://inj");

        let no_injected = sources(None, Some("https://primary"), Some("https://legacy"));
        assert_eq!(resolve_base_url(&no_injected), "https://primary");

        let legacy_only = sources(None, None, Some("https://legacy"));
        assert_eq!(resolve_base_url(&legacy_only), "https://legacy");

        assert_eq!(resolve_base_url(&EndpointSources::default()), "");
    }

    #[test]
    fn test_blank_sources_are_skipped() {
        let blanks = sources(Some("   "), Some(""), Some(" https://legacy/ "));
        assert_eq!(resolve_base_url(&blanks), "https://legacy");
    }

    #[test]
    fn test_trailing_slash_normalization() {
        let with_slash = sources(Some("https://api.example.com/"), None, None);
        let without = sources(Some("https://api.example.com"), None, None);
        assert_eq!(resolve_base_url(&with_slash), resolve_base_url(&without));

        // Only one slash is stripped
        assert_eq!(
            normalize_base_url("https://api.example.com//"),
            "https://api.example.com/"
        );
        assert_eq!(
            normalize_base_url("  https://api.example.com/v1/ \n"),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let lookup = lookup_from(&[(env::BASE_URL, "https://api.example.com/")]);
        let first = resolve_base_url(&EndpointSources::from_lookup(None, &lookup));
        let second = resolve_base_url(&EndpointSources::from_lookup(None, &lookup));
        assert_eq!(first, second);
        assert_eq!(first, "https://api.example.com");
    }

    #[test]
    fn test_from_lookup_reads_both_env_names() {
        let lookup = lookup_from(&[
            (env::BASE_URL, "https://primary"),
            (env::LEGACY_BASE_URL, "https://legacy"),
        ]);
        let sources = EndpointSources::from_lookup(None, lookup);
        assert_eq!(sources.primary.as_deref(), Some("https://primary"));
        assert_eq!(sources.legacy.as_deref(), Some("https://legacy"));
    }

    #[test]
    fn test_from_env_keeps_injected_value() {
        let sources = EndpointSources::from_env(Some("https://inj/".to_string()));
        assert_eq!(sources.injected.as_deref(), Some("https://inj/"));
        assert_eq!(resolve_base_url(&sources), "https://inj");
    }

    fn create_test_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [api]
            base_url = "https://file.example.com/"
            timeout_secs = 30

            [logging]
            level = "debug"
        "#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_config_file() {
        let file = create_test_config();
        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://file.example.com/"));
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let config = TomlConfig::parse("").unwrap();
        let resolved = ClientConfig::resolve(config, None, lookup_from(&[]));
        assert_eq!(resolved.base_url, "");
        assert!(resolved.is_same_origin());
        assert_eq!(resolved.timeout_secs, None);
        assert_eq!(resolved.log_level, "info");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(TomlConfig::parse("[api]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        assert!(TomlConfig::parse("[api\nbase_url = 1").is_err());
    }

    #[test]
    fn test_file_value_beats_environment() {
        let file = TomlConfig::from_file(create_test_config().path()).unwrap();
        let lookup = lookup_from(&[(env::BASE_URL, "https://env.example.com")]);
        let resolved = ClientConfig::resolve(file, None, lookup);
        assert_eq!(resolved.base_url, "https://file.example.com");
        assert_eq!(resolved.log_level, "debug");
    }

    #[test]
    fn test_cli_value_beats_file() {
        let file = TomlConfig::from_file(create_test_config().path()).unwrap();
        let resolved = ClientConfig::resolve(
            file,
            Some("https://cli.example.com/".to_string()),
            lookup_from(&[]),
        );
        assert_eq!(resolved.base_url, "https://cli.example.com");
    }

    #[test]
    fn test_environment_used_without_override() {
        let lookup = lookup_from(&[
            (env::LEGACY_BASE_URL, "https://legacy.example.com/"),
            (env::LOG_LEVEL, "warn"),
        ]);
        let resolved = ClientConfig::resolve(TomlConfig::default(), Some(" ".to_string()), lookup);
        assert_eq!(resolved.base_url, "https://legacy.example.com");
        assert_eq!(resolved.log_level, "warn");
    }

    #[test]
    fn test_explicit_missing_config_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(ClientConfig::from_env(None, Some(missing)).is_err());
    }
}
