use crate::catalog::{ContentCatalog, ContentError};
use crate::config::RulesConfig;

/// Immutable inputs a session reads from: the content catalog and the rules.
#[derive(Debug, Clone, PartialEq)]
pub struct GameContext {
    pub catalog: ContentCatalog,
    pub rules: RulesConfig,
}

impl GameContext {
    /// Pair a catalog with rules after checking the rules point at real content.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid or a rule target is missing.
    pub fn new(catalog: ContentCatalog, rules: RulesConfig) -> Result<Self, ContentError> {
        catalog.validate()?;
        catalog.validate_rules(&rules)?;
        Ok(Self { catalog, rules })
    }

    /// Bundled content and rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded assets are malformed.
    pub fn load_from_static() -> Result<Self, ContentError> {
        Self::new(
            ContentCatalog::load_from_static()?,
            RulesConfig::load_from_static(),
        )
    }
}
