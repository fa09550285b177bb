//! Hot-reloadable configuration store
//!
//! The engine reads the business configuration through an immutable
//! `Arc` snapshot taken at the start of each turn. Reload builds a new
//! table off to the side and swaps the reference; requests already in
//! flight keep the snapshot they started with.

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{BusinessConfig, ConfigError};

#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: Option<PathBuf>,
    current: RwLock<Arc<BusinessConfig>>,
}

impl ConfigStore {
    /// Load from `path`, falling back to built-in defaults when the
    /// file is absent or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = match BusinessConfig::load_file(&path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    business_types = config.businesses.len(),
                    "loaded business configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "business configuration not loaded, using built-in defaults"
                );
                BusinessConfig::default()
            }
        };
        Self {
            inner: Arc::new(Inner {
                path: Some(path),
                current: RwLock::new(Arc::new(config)),
            }),
        }
    }

    /// Store with built-in defaults and no backing file (tests).
    pub fn with_defaults() -> Self {
        Self::with_config(BusinessConfig::default())
    }

    pub fn with_config(config: BusinessConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: None,
                current: RwLock::new(Arc::new(config)),
            }),
        }
    }

    /// Immutable snapshot for the duration of one turn.
    pub fn snapshot(&self) -> Arc<BusinessConfig> {
        self.inner.current.read().clone()
    }

    /// Re-read the backing file and swap the snapshot atomically.
    /// Returns the number of configured business types.
    pub fn reload(&self) -> Result<usize, ConfigError> {
        let path = self
            .inner
            .path
            .as_ref()
            .ok_or_else(|| ConfigError::FileNotFound("no backing file".to_string()))?;
        let config = BusinessConfig::load_file(path)?;
        let count = config.businesses.len();
        *self.inner.current.write() = Arc::new(config);
        tracing::info!(business_types = count, "business configuration reloaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn snapshot_is_stable_across_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_language": "en"}}"#).unwrap();
        file.flush().unwrap();

        let store = ConfigStore::load(file.path());
        let before = store.snapshot();

        std::fs::write(file.path(), r#"{"default_language": "zh"}"#).unwrap();
        store.reload().unwrap();
        let after = store.snapshot();

        // The earlier snapshot is untouched by the swap.
        assert_eq!(before.default_language, "en");
        assert_eq!(after.default_language, "zh");
    }

    #[test]
    fn reload_without_backing_file_fails() {
        let store = ConfigStore::with_defaults();
        assert!(store.reload().is_err());
        assert_eq!(store.snapshot().default_language, "en");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let store = ConfigStore::load("/nonexistent/business.json");
        assert!(!store.snapshot().businesses.is_empty());
    }
}
