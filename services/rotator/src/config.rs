//! Configuration types and loading
//!
//! Config precedence: CLI `--config` > `CONFIG_PATH` env var > the default
//! file name in the working directory. Every field has a default so the
//! rotator runs with no config file at all — a missing file is not an
//! error, only an unparseable or invalid one is.

use std::path::{Path, PathBuf};

use openloop_api::{API_BASE_URL, API_HOST};
use serde::Deserialize;
use tracing::info;

/// Root configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Upstream API settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout for both endpoints. The upstream's own behavior is
    /// unbounded, so a hung call would stall the whole rotation without
    /// this cap.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Local directory layout
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub token_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_dir: PathBuf::from("tokens"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> common::Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            info!(path = %path.display(), "configuration loaded");
            config
        } else {
            info!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve config file path from CLI arg or `CONFIG_PATH` env var.
    pub fn resolve_path(cli_path: Option<&Path>) -> PathBuf {
        if let Some(p) = cli_path {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("openloop-rotator.toml")
    }

    /// Host name the latency probe should target, derived from the base URL.
    pub fn api_host(&self) -> String {
        reqwest::Url::parse(&self.api.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
            .unwrap_or_else(|| API_HOST.to_owned())
    }

    fn validate(&self) -> common::Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "api.base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(common::Error::Config(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that mutate environment variables so parallel test
    /// threads don't race on the process environment.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load_or_default(Path::new("/nonexistent/rotator.toml")).unwrap();
        assert_eq!(config.api.base_url, API_BASE_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.token_dir, PathBuf::from("tokens"));
        assert_eq!(config.storage.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn load_valid_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://127.0.0.1:9000"
timeout_secs = 5

[storage]
token_dir = "/var/lib/rotator/tokens"
"#,
        )
        .unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(
            config.storage.token_dir,
            PathBuf::from("/var/lib/rotator/tokens")
        );
        // Unset sections keep their defaults
        assert_eq!(config.storage.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "api = {{{{ nope").unwrap();

        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn base_url_without_scheme_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"api.openloop.so\"\n").unwrap();

        let err = Config::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("base_url"), "got: {err}");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"), "got: {err}");
    }

    #[test]
    fn api_host_comes_from_base_url() {
        let config = Config {
            api: ApiConfig {
                base_url: "http://localhost:9000".into(),
                timeout_secs: 30,
            },
            storage: StorageConfig::default(),
        };
        assert_eq!(config.api_host(), "localhost");
    }

    #[test]
    fn api_host_default_matches_production() {
        let config = Config::default();
        assert_eq!(config.api_host(), API_HOST);
    }

    #[test]
    fn resolve_path_prefers_cli_over_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/from/env.toml") };

        let path = Config::resolve_path(Some(Path::new("/from/cli.toml")));
        assert_eq!(path, PathBuf::from("/from/cli.toml"));

        unsafe { remove_env("CONFIG_PATH") };
    }

    #[test]
    fn resolve_path_uses_env_when_no_cli_arg() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_env("CONFIG_PATH", "/from/env.toml") };

        let path = Config::resolve_path(None);
        assert_eq!(path, PathBuf::from("/from/env.toml"));

        unsafe { remove_env("CONFIG_PATH") };
    }

    #[test]
    fn resolve_path_falls_back_to_default_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { remove_env("CONFIG_PATH") };

        let path = Config::resolve_path(None);
        assert_eq!(path, PathBuf::from("openloop-rotator.toml"));
    }
}
