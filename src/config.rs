// ── Sync configuration ──
//
// Everything here has a default that reproduces the plain optimistic behavior: local
// writes are never undone and created drafts never pick up their server id.
// Bootstrapping code may hand in a TOML document to change that.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the entity store reconciles optimistic writes with gateway outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncPolicy {
    /// Undo an optimistic create/update/delete when the gateway call fails.
    pub rollback_on_failure: bool,
    /// Write the server-assigned id into the optimistic draft once create succeeds.
    pub reconcile_id_on_create_success: bool,
    /// Drop list/get answers that were overtaken by a newer request or local write.
    pub discard_stale_responses: bool,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            rollback_on_failure: false,
            reconcile_id_on_create_success: false,
            discard_stale_responses: true,
        }
    }
}

/// Settings for the in-process product service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Request channel capacity of the service actor.
    pub buffer_size: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

/// Top-level configuration.
///
/// ```toml
/// [policy]
/// rollback_on_failure = true
///
/// [remote]
/// buffer_size = 64
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub policy: SyncPolicy,
    pub remote: RemoteConfig,
}

impl SyncConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = SyncConfig::from_toml_str("").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert!(!config.policy.rollback_on_failure);
        assert!(!config.policy.reconcile_id_on_create_success);
        assert!(config.policy.discard_stale_responses);
        assert_eq!(config.remote.buffer_size, 32);
    }

    #[test]
    fn test_partial_policy_overrides() {
        let config = SyncConfig::from_toml_str(
            "[policy]\nrollback_on_failure = true\n\n[remote]\nbuffer_size = 4\n",
        )
        .unwrap();
        assert!(config.policy.rollback_on_failure);
        assert!(config.policy.discard_stale_responses);
        assert_eq!(config.remote.buffer_size, 4);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = SyncConfig::from_toml_str("[policy]\nretry = true\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SyncConfig::load("/nonexistent/product-sync.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/product-sync.toml"));
    }
}
