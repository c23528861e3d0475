//! Registry configuration
//!
//! Loaded from RON, e.g.
//!
//! ```ron
//! (
//!     replace_policy: Strict,
//!     initial_capacity: 64,
//!     warn_on_shared_teardown: true,
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// What `replace` does when the handle's slot does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacePolicy {
    /// Insert a new slot at the handle's id and log a warning
    #[default]
    Upsert,
    /// Fail with an out-of-range error
    Strict,
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Behavior of `replace` on a released or never-created handle
    pub replace_policy: ReplacePolicy,
    /// Slots pre-allocated by every newly created table
    pub initial_capacity: usize,
    /// Warn when a table is still referenced elsewhere at teardown
    pub warn_on_shared_teardown: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            replace_policy: ReplacePolicy::Upsert,
            initial_capacity: 0,
            warn_on_shared_teardown: true,
        }
    }
}

impl RegistryConfig {
    /// Parse a config from RON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&text)
    }

    /// Set the replace policy
    #[must_use]
    pub fn with_replace_policy(mut self, policy: ReplacePolicy) -> Self {
        self.replace_policy = policy;
        self
    }

    /// Set the initial slot capacity of new tables
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable the shared-table teardown warning
    #[must_use]
    pub fn with_shared_teardown_warning(mut self, warn: bool) -> Self {
        self.warn_on_shared_teardown = warn;
        self
    }
}

/// Errors that can occur while loading a config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Error reading the file
    Io(String),
    /// Error parsing RON
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = RegistryConfig::from_ron_str(
            "(replace_policy: Strict, initial_capacity: 16, warn_on_shared_teardown: false)",
        )
        .unwrap();

        assert_eq!(config.replace_policy, ReplacePolicy::Strict);
        assert_eq!(config.initial_capacity, 16);
        assert!(!config.warn_on_shared_teardown);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = RegistryConfig::from_ron_str("(initial_capacity: 8)").unwrap();
        assert_eq!(config.replace_policy, ReplacePolicy::Upsert);
        assert_eq!(config.initial_capacity, 8);
        assert!(config.warn_on_shared_teardown);

        let config = RegistryConfig::from_ron_str("()").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let result = RegistryConfig::from_ron_str("(replace_policy: Sometimes)");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RegistryConfig::load("does/not/exist.ron");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_builder() {
        let config = RegistryConfig::default()
            .with_replace_policy(ReplacePolicy::Strict)
            .with_initial_capacity(32)
            .with_shared_teardown_warning(false);

        assert_eq!(config.replace_policy, ReplacePolicy::Strict);
        assert_eq!(config.initial_capacity, 32);
        assert!(!config.warn_on_shared_teardown);
    }
}
