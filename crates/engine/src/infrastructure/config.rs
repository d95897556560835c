//! Engine configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use gamecraft_domain::DEFAULT_MAX_SUGGESTIONS;

use crate::infrastructure::ollama::{
    DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_TIMEOUT_SECS,
};

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_GENERATED_GAMES_DIR: &str = "generated_games";

/// Which extraction strategy handles incoming messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    #[default]
    Rules,
    Llm,
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" | "regex" => Ok(Self::Rules),
            "llm" | "ollama" => Ok(Self::Llm),
            other => Err(format!("unknown extraction mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub extraction_mode: ExtractionMode,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ollama_timeout_secs: u64,
    pub generated_games_dir: PathBuf,
    pub max_suggestions: usize,
    /// Comma separated origins, or `*`. Unset leaves CORS off.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            extraction_mode: ExtractionMode::Rules,
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            ollama_timeout_secs: DEFAULT_OLLAMA_TIMEOUT_SECS,
            generated_games_dir: PathBuf::from(DEFAULT_GENERATED_GAMES_DIR),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(
                "SERVER_PORT",
                get("SERVER_PORT").or_else(|| get("PORT")),
                defaults.server_port,
            ),
            extraction_mode: parse_or(
                "EXTRACTION_MODE",
                get("EXTRACTION_MODE"),
                defaults.extraction_mode,
            ),
            ollama_base_url: get("OLLAMA_BASE_URL")
                .or_else(|| get("OLLAMA_URL"))
                .unwrap_or(defaults.ollama_base_url),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            ollama_timeout_secs: parse_or(
                "OLLAMA_TIMEOUT_SECS",
                get("OLLAMA_TIMEOUT_SECS"),
                defaults.ollama_timeout_secs,
            ),
            generated_games_dir: get("GENERATED_GAMES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.generated_games_dir),
            max_suggestions: parse_or(
                "MAX_SUGGESTIONS",
                get("MAX_SUGGESTIONS"),
                defaults.max_suggestions,
            ),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, fallback = ?default, "Invalid config value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]), EngineConfig::default());
        assert_eq!(config(&[]).bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn reads_every_key() {
        let cfg = config(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9000"),
            ("EXTRACTION_MODE", "LLM"),
            ("OLLAMA_BASE_URL", "http://gpu:11434"),
            ("OLLAMA_MODEL", "llama3.2"),
            ("OLLAMA_TIMEOUT_SECS", "15"),
            ("GENERATED_GAMES_DIR", "/tmp/games"),
            ("MAX_SUGGESTIONS", "3"),
            ("CORS_ALLOWED_ORIGINS", "*"),
        ]);

        assert_eq!(cfg.bind_address(), "127.0.0.1:9000");
        assert_eq!(cfg.extraction_mode, ExtractionMode::Llm);
        assert_eq!(cfg.ollama_base_url, "http://gpu:11434");
        assert_eq!(cfg.ollama_model, "llama3.2");
        assert_eq!(cfg.ollama_timeout_secs, 15);
        assert_eq!(cfg.generated_games_dir, PathBuf::from("/tmp/games"));
        assert_eq!(cfg.max_suggestions, 3);
        assert_eq!(cfg.cors_allowed_origins.as_deref(), Some("*"));
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        assert_eq!(config(&[("PORT", "8080")]).server_port, 8080);
        assert_eq!(
            config(&[("PORT", "8080"), ("SERVER_PORT", "9090")]).server_port,
            9090
        );
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let cfg = config(&[
            ("SERVER_PORT", "eighty"),
            ("EXTRACTION_MODE", "telepathy"),
            ("MAX_SUGGESTIONS", "-1"),
            ("SERVER_HOST", "   "),
        ]);
        assert_eq!(cfg, EngineConfig::default());
    }
}
