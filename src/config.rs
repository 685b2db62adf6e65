//! Configuration file support
//!
//! Loads settings from ~/.autohighlight.toml (or
//! %USERPROFILE%\.autohighlight.toml on Windows), or from an explicit path.
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! Example:
//! ```text
//! # autohighlight configuration
//! max_detect_bytes = 50000
//! min_score = 0.5
//! class_prefix = "hl-"
//! grammar_dirs = ["/usr/share/autohighlight/grammars"]
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HighlightError, Result};
use crate::syntax::{ScoringPolicy, DEFAULT_CLASS_PREFIX};

/// Smallest detection window accepted from a config file
pub const MIN_DETECT_BYTES: usize = 1024;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Bytes examined during auto-detection
    pub max_detect_bytes: usize,
    /// Scores at or below this are low confidence
    pub min_score: f64,
    /// Weight of the covered-bytes fraction
    pub coverage_weight: f64,
    /// Weight of keyword relevance
    pub keyword_weight: f64,
    /// Penalty for input ending inside a region
    pub unterminated_penalty: f64,
    /// Prefix of generated span classes
    pub class_prefix: String,
    /// Extra directories of `*.toml` grammars
    pub grammar_dirs: Vec<PathBuf>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let policy = ScoringPolicy::default();
        Self {
            max_detect_bytes: policy.max_detect_bytes,
            min_score: policy.min_score,
            coverage_weight: policy.coverage_weight,
            keyword_weight: policy.keyword_weight,
            unterminated_penalty: policy.unterminated_penalty,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            grammar_dirs: Vec::new(),
        }
    }
}

impl HighlightConfig {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".autohighlight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".autohighlight.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// Falls back to defaults when there is no home directory or no file.
    pub fn load_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`
    ///
    /// A missing file yields the defaults; a file that exists but does
    /// not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::from_toml(&contents)
            .map_err(|e| HighlightError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Self::from_toml(contents).map_err(|e| HighlightError::Config(e.to_string()))
    }

    fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(contents)?;
        config.clamp();
        Ok(config)
    }

    /// Pull out-of-range values back into range
    fn clamp(&mut self) {
        self.max_detect_bytes = self.max_detect_bytes.max(MIN_DETECT_BYTES);
        self.coverage_weight = non_negative(self.coverage_weight);
        self.keyword_weight = non_negative(self.keyword_weight);
        self.unterminated_penalty = non_negative(self.unterminated_penalty);
        if !self.min_score.is_finite() {
            self.min_score = ScoringPolicy::default().min_score;
        }
    }

    /// Scoring policy described by this configuration
    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            max_detect_bytes: self.max_detect_bytes,
            min_score: self.min_score,
            coverage_weight: self.coverage_weight,
            keyword_weight: self.keyword_weight,
            unterminated_penalty: self.unterminated_penalty,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
max_detect_bytes = 4096
min_score = 1.5
class_prefix = "hl-"
grammar_dirs = ["/tmp/grammars"]
        "#;

        let config = HighlightConfig::parse(contents).unwrap();
        assert_eq!(config.max_detect_bytes, 4096);
        assert_eq!(config.min_score, 1.5);
        assert_eq!(config.class_prefix, "hl-");
        assert_eq!(config.grammar_dirs, vec![PathBuf::from("/tmp/grammars")]);
        assert_eq!(config.coverage_weight, 2.0);
    }

    #[test]
    fn test_clamps_values() {
        let config = HighlightConfig::parse(
            "max_detect_bytes = 10\nkeyword_weight = -3.0\nunterminated_penalty = -1.0\n",
        )
        .unwrap();
        assert_eq!(config.max_detect_bytes, MIN_DETECT_BYTES);
        assert_eq!(config.keyword_weight, 0.0);
        assert_eq!(config.unterminated_penalty, 0.0);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let err = HighlightConfig::parse("tab_width = 4\n").unwrap_err();
        assert!(matches!(err, HighlightError::Config(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HighlightConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HighlightConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "min_score = 2.0\n").unwrap();
        let config = HighlightConfig::load(&path).unwrap();
        assert_eq!(config.policy().min_score, 2.0);
        assert_eq!(config.policy().max_detect_bytes, 100_000);
    }

    #[test]
    fn test_bad_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "min_score = \"high\"\n").unwrap();
        let err = HighlightConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
