//! Content loaders. The embedded loader backs tests, the tester and any
//! front-end that ships the default content.
use std::path::PathBuf;
use thiserror::Error;

use crate::DataLoader;
use crate::catalog::{ContentCatalog, ContentError};
use crate::config::{ConfigError, RulesConfig};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads the content and rules compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLoader;

impl DataLoader for StaticLoader {
    type Error = LoadError;

    fn load_catalog(&self) -> Result<ContentCatalog, Self::Error> {
        Ok(ContentCatalog::load_from_static()?)
    }

    fn load_rules(&self) -> Result<RulesConfig, Self::Error> {
        Ok(RulesConfig::load_from_static())
    }
}

/// Loads `content.json` and `rules.json` from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, name: &str) -> Result<String, LoadError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

impl DataLoader for DirLoader {
    type Error = LoadError;

    fn load_catalog(&self) -> Result<ContentCatalog, Self::Error> {
        Ok(ContentCatalog::from_json(&self.read("content.json")?)?)
    }

    fn load_rules(&self) -> Result<RulesConfig, Self::Error> {
        Ok(RulesConfig::from_json(&self.read("rules.json")?)?)
    }
}
