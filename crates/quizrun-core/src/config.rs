//! quizrun configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::DEFAULT_CELEBRATE_THRESHOLD;

/// Top-level quizrun configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizrunConfig {
    /// Fixed RNG seed for reproducible shuffles (random if unset).
    #[serde(default)]
    pub seed: Option<u64>,
    /// Percentage above which the report headline celebrates.
    #[serde(default = "default_threshold")]
    pub celebrate_threshold: u32,
    /// Where reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report output format: text, json, html, all.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_threshold() -> u32 {
    DEFAULT_CELEBRATE_THRESHOLD
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizrun-reports")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for QuizrunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            celebrate_threshold: default_threshold(),
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// Environment variable override: `QUIZRUN_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizrunConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrun.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizrunConfig::default(),
    };

    if let Ok(raw) = std::env::var("QUIZRUN_SEED") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => tracing::warn!("ignoring QUIZRUN_SEED={raw:?}: not an unsigned integer"),
        }
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<QuizrunConfig> {
    let config: QuizrunConfig = toml::from_str(content)?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizrunConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.celebrate_threshold, 70);
        assert_eq!(config.format, "text");
        assert_eq!(config.output_dir, PathBuf::from("./quizrun-reports"));
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config("seed = 42\nformat = \"html\"\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.format, "html");
        assert_eq!(config.celebrate_threshold, 70);
    }

    #[test]
    fn parse_invalid_config() {
        assert!(parse_config("seed = \"not a number\"").is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/no/such/quizrun.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizrun.toml");
        std::fs::write(&path, "celebrate_threshold = 90\noutput_dir = \"out\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.celebrate_threshold, 90);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
