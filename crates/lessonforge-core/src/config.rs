//! lessonforge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level lessonforge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonforgeConfig {
    /// Number of questions requested per quiz.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Who the generated material is written for.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Generation attempts before giving up on a quiz.
    #[serde(default = "default_attempts")]
    pub max_generation_attempts: u32,
    /// Delay before the first retry in milliseconds; doubles per retry.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Upper bound on one call to an external generator command, in seconds.
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
}

fn default_question_count() -> usize {
    5
}
fn default_audience() -> String {
    "children".to_string()
}
fn default_attempts() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_generation_timeout() -> u64 {
    120
}

impl Default for LessonforgeConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            audience: default_audience(),
            max_generation_attempts: default_attempts(),
            retry_delay_ms: default_retry_delay(),
            generation_timeout_secs: default_generation_timeout(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `lessonforge.toml` in the current directory
/// 2. `~/.config/lessonforge/config.toml`
///
/// Environment variable overrides: `LESSONFORGE_QUESTION_COUNT`, `LESSONFORGE_AUDIENCE`.
pub fn load_config_from(path: Option<&Path>) -> Result<LessonforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lessonforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LessonforgeConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Parse a TOML string into a config (useful for testing).
pub fn parse_config_str(content: &str) -> Result<LessonforgeConfig> {
    Ok(toml::from_str(content)?)
}

/// Apply `LESSONFORGE_*` overrides looked up through `var`.
fn apply_overrides(
    config: &mut LessonforgeConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(count) = var("LESSONFORGE_QUESTION_COUNT") {
        config.question_count = count
            .trim()
            .parse()
            .with_context(|| format!("invalid LESSONFORGE_QUESTION_COUNT: '{count}'"))?;
    }

    if let Some(audience) = var("LESSONFORGE_AUDIENCE") {
        if !audience.trim().is_empty() {
            config.audience = audience.trim().to_string();
        }
    }

    Ok(())
}

fn validate_config(config: &LessonforgeConfig) -> Result<()> {
    anyhow::ensure!(config.question_count >= 1, "question_count must be at least 1");
    anyhow::ensure!(
        config.max_generation_attempts >= 1,
        "max_generation_attempts must be at least 1"
    );
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lessonforge"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config() {
        let config = LessonforgeConfig::default();
        assert_eq!(config.question_count, 5);
        assert_eq!(config.audience, "children");
        assert_eq!(config.max_generation_attempts, 3);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str("question_count = 8\naudience = \"teenagers\"").unwrap();
        assert_eq!(config.question_count, 8);
        assert_eq!(config.audience, "teenagers");
        assert_eq!(config.retry_delay_ms, 1000);
    }

    #[test]
    fn parse_malformed_config() {
        assert!(parse_config_str("question_count = \"many\"").is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "max_generation_attempts = 5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.max_generation_attempts, 5);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/lessonforge.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = parse_config_str("question_count = 8\naudience = \"teenagers\"").unwrap();
        apply_overrides(
            &mut config,
            vars(&[
                ("LESSONFORGE_QUESTION_COUNT", " 3 "),
                ("LESSONFORGE_AUDIENCE", "adults"),
            ]),
        )
        .unwrap();
        assert_eq!(config.question_count, 3);
        assert_eq!(config.audience, "adults");
    }

    #[test]
    fn blank_audience_override_is_ignored() {
        let mut config = LessonforgeConfig::default();
        apply_overrides(&mut config, vars(&[("LESSONFORGE_AUDIENCE", "  ")])).unwrap();
        assert_eq!(config.audience, "children");
    }

    #[test]
    fn invalid_question_count_override_is_an_error() {
        let mut config = LessonforgeConfig::default();
        let err = apply_overrides(&mut config, vars(&[("LESSONFORGE_QUESTION_COUNT", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("invalid LESSONFORGE_QUESTION_COUNT: 'lots'"));
        assert_eq!(config.question_count, 5);
    }

    #[test]
    fn zero_questions_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.toml");
        std::fs::write(&path, "question_count = 0\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
