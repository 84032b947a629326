use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::matching::{DEFAULT_JITTER, DEFAULT_MIN_SCORE, MAX_JITTER};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skills the user is matched on.
    pub skills: Vec<String>,
    pub min_match_score: i32,
    /// Half-width of the random score jitter. 0 disables it.
    pub jitter: f64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: vec![
                "Möbelmontering".to_string(),
                "Tekniksupport".to_string(),
                "Flytthjälp".to_string(),
            ],
            min_match_score: DEFAULT_MIN_SCORE,
            jitter: DEFAULT_JITTER,
            seed: None,
        }
    }
}

impl Config {
    /// Load from the platform config directory, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.jitter.is_finite() || !(0.0..=MAX_JITTER).contains(&self.jitter) {
            return Err(anyhow!(
                "jitter must be between 0 and {}, got {}",
                MAX_JITTER,
                self.jitter
            ));
        }
        Ok(())
    }

    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pact").map(|d| d.config_dir().join("config.json"))
    }
}
