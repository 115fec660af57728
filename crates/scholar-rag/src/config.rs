use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Directory answer records are written to.
    pub answers_dir: PathBuf,
    /// Baseline top-k when no strategy rule raises it.
    pub default_top_k: usize,
    /// Upper bound on the assembled context, in characters.
    pub context_char_limit: usize,
    /// Cap on snippets requested from the web-search fallback.
    pub max_web_results: usize,
}

impl RagConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_top_k == 0 {
            return Err("default_top_k must be > 0".into());
        }
        if self.context_char_limit < 100 {
            return Err("context_char_limit must be >= 100".into());
        }
        if self.max_web_results == 0 {
            return Err("max_web_results must be > 0".into());
        }
        Ok(())
    }

    /// Load config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            answers_dir: PathBuf::from("answers"),
            default_top_k: 3,
            context_char_limit: 6000,
            max_web_results: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(RagConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_top_k_rejected() {
        let config = RagConfig {
            default_top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_context_limit_rejected() {
        let config = RagConfig {
            context_char_limit: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{"answers_dir": "out", "default_top_k": 4, "context_char_limit": 5000, "max_web_results": 2}}"#
        )
        .unwrap();

        let config = RagConfig::from_file(&path).unwrap();
        assert_eq!(config.default_top_k, 4);
        assert_eq!(config.context_char_limit, 5000);
        assert_eq!(config.answers_dir, PathBuf::from("out"));
    }
}
