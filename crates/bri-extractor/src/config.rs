//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Default oracle window size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum window handed to the label oracle per call (bytes)
    ///
    /// Must comfortably hold two complete entries; otherwise extraction
    /// fails with `ExtractorError::ChunkTooSmall`.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Log progress after each window
    #[serde(default = "default_true")]
    pub report_progress: bool,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_true() -> bool {
    true
}

impl ExtractorConfig {
    /// Set the window size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            report_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 10_000);
    }

    #[test]
    fn test_zero_chunk_size_is_invalid() {
        let config = ExtractorConfig::default().with_chunk_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default().with_chunk_size(2_500);
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_missing_fields_use_defaults() {
        let parsed = ExtractorConfig::from_toml("").unwrap();
        assert_eq!(parsed, ExtractorConfig::default());

        let parsed = ExtractorConfig::from_toml("chunk_size = 400").unwrap();
        assert_eq!(parsed.chunk_size, 400);
        assert!(parsed.report_progress);
    }
}
