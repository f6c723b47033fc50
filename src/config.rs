//! Encoder and loader configuration.

use serde::{Deserialize, Serialize};

/// How malformed cells are handled during encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsePolicy {
    /// Unparsable numbers become `0.0`; invalid categorical codes activate
    /// no one-hot slot.
    #[default]
    Lenient,
    /// Unparsable numbers and invalid categorical codes are errors.
    Strict,
}

/// CSV reader settings for the data file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field separator.
    pub delimiter: u8,
    /// Skip the first record as a header line.
    pub has_headers: bool,
    /// Strip whitespace around fields.
    pub trim: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            trim: true,
        }
    }
}

impl CsvConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Top-level configuration for an [`crate::EncodedDataset`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub parse_policy: ParsePolicy,
    pub csv: CsvConfig,
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the malformed-cell policy.
    pub fn with_parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.parse_policy = policy;
        self
    }

    /// Set the CSV reader settings used by [`crate::io::load_dataset`].
    pub fn with_csv(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
        assert_eq!(config.csv.delimiter, b',');
        assert!(!config.csv.has_headers);
        assert!(config.csv.trim);
    }

    #[test]
    fn test_builder() {
        let config = EncoderConfig::new()
            .with_parse_policy(ParsePolicy::Strict)
            .with_csv(CsvConfig::default().with_delimiter(b';').with_headers(true));
        assert_eq!(config.parse_policy, ParsePolicy::Strict);
        assert_eq!(config.csv.delimiter, b';');
        assert!(config.csv.has_headers);
    }

    #[test]
    fn test_config_json() {
        let config = EncoderConfig::new().with_parse_policy(ParsePolicy::Strict);
        let json = serde_json::to_string(&config).unwrap();
        let back: EncoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
