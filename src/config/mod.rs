/// Layered configuration for the greenprompt client.
///
/// Precedence, lowest to highest:
///
/// 1. **Built-in defaults** — the fixed backend deployment, 30 s timeout.
/// 2. **TOML config file** — `~/.greenprompt/config.toml`
///    ```toml
///    backend_url = "http://localhost:8000"
///    timeout_ms = 10000
///    show_optimized = false
///    ```
/// 3. **Environment variables** — `GREENPROMPT_*` (highest precedence).
///
/// Missing or malformed files are silently ignored — the client always
/// starts with a usable configuration.
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// The fixed backend deployment.
const DEFAULT_BACKEND_URL: &str = "https://backend.tokenterminator.deploy.selectcode.dev";

/// Default timeout for backend requests. Both pipeline phases run LLM
/// completions server-side, so this is generous.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// ---------------------------------------------------------------------------
// Public config struct
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL.
    pub backend_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Whether the session view highlights the optimization by default.
    pub show_optimized: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            show_optimized: true,
        }
    }
}

impl ClientConfig {
    /// Load the config using the precedence chain:
    /// built-in defaults → TOML config file → environment variables.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(file_cfg) = FileConfig::load() {
            file_cfg.apply_to(&mut config);
        }

        Self::apply_env_overrides(&mut config);

        config
    }

    fn apply_env_overrides(config: &mut Self) {
        if let Ok(val) = std::env::var("GREENPROMPT_BACKEND_URL")
            && !val.is_empty()
        {
            config.backend_url = val;
        }

        if let Ok(val) = std::env::var("GREENPROMPT_TIMEOUT_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.timeout_ms = ms;
        }

        if let Ok(val) = std::env::var("GREENPROMPT_SHOW_OPTIMIZED") {
            config.show_optimized = matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// TOML config file schema
// ---------------------------------------------------------------------------

/// Config file schema (`~/.greenprompt/config.toml`).
///
/// All fields are optional — only present values override the defaults.
#[derive(Debug, Deserialize)]
struct FileConfig {
    backend_url: Option<String>,
    timeout_ms: Option<u64>,
    show_optimized: Option<bool>,
}

impl FileConfig {
    /// Attempt to load the config file. Returns `None` if the file doesn't
    /// exist or is malformed.
    fn load() -> Option<Self> {
        let path = config_file_path()?;
        let contents = fs::read_to_string(path).ok()?;
        toml::from_str(&contents).ok()
    }

    /// Merge file-level overrides into a [`ClientConfig`].
    fn apply_to(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.backend_url {
            config.backend_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout_ms = ms;
        }
        if let Some(show) = self.show_optimized {
            config.show_optimized = show;
        }
    }
}

/// Resolve the path to the config file: `~/.greenprompt/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".greenprompt").join("config.toml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(
            config.backend_url,
            "https://backend.tokenterminator.deploy.selectcode.dev"
        );
        assert_eq!(config.timeout_ms, 30_000);
        assert!(config.show_optimized);
    }

    #[test]
    fn file_config_apply_partial_overrides() {
        let mut config = ClientConfig::default();
        let file = FileConfig {
            backend_url: Some("http://localhost:8000".to_string()),
            timeout_ms: None,
            show_optimized: Some(false),
        };

        file.apply_to(&mut config);

        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.timeout_ms, 30_000); // unchanged
        assert!(!config.show_optimized);
    }

    #[test]
    fn deserialize_config_toml_full() {
        let toml_str = r#"
            backend_url = "http://custom:9000"
            timeout_ms = 5000
            show_optimized = false
        "#;
        let file: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(file.backend_url.as_deref(), Some("http://custom:9000"));
        assert_eq!(file.timeout_ms, Some(5000));
        assert_eq!(file.show_optimized, Some(false));
    }

    #[test]
    fn deserialize_config_toml_empty() {
        let file: FileConfig = toml::from_str("").unwrap();
        assert!(file.backend_url.is_none());
        assert!(file.timeout_ms.is_none());
        assert!(file.show_optimized.is_none());
    }
}
