use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::registry::DEFAULT_LEGACY_NAMESPACE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Namespace object that holds legacy entry points.
    pub legacy_namespace: String,
    /// When false, only the current draft is detected.
    pub detect_legacy: bool,
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let namespace = self.legacy_namespace.as_str();
        if namespace.is_empty() {
            return Err(ConfigError::InvalidLegacyNamespace {
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(invalid) = namespace
            .chars()
            .find(|character| !(character.is_ascii_alphanumeric() || *character == '_'))
        {
            return Err(ConfigError::InvalidLegacyNamespace {
                reason: format!("unexpected character {invalid:?} in {namespace}"),
            });
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            legacy_namespace: DEFAULT_LEGACY_NAMESPACE.to_string(),
            detect_legacy: true,
        }
    }
}
