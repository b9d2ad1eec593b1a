//! Ledger layer configuration.

use serde::Deserialize;

use crate::codec::Codec;
use crate::error::{LedgerError, Result};

/// Settings shared by the repository, the roster index, and the service.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```ignore
/// let config = LedgerConfig::from_json_str(r#"{ "codec": "bitcode" }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Composite index that enumerates every patient.
    pub roster_index: String,
    /// First attribute of each roster entry; the category baked into the key.
    pub roster_category: String,
    /// Encoding of aggregate snapshots.
    pub codec: Codec,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            roster_index: "people".to_string(),
            roster_category: "people".to_string(),
            codec: Codec::Json,
        }
    }
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json)
            .map_err(|e| LedgerError::validation(0, format!("invalid ledger config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_roster(mut self, index: impl Into<String>, category: impl Into<String>) -> Self {
        self.roster_index = index.into();
        self.roster_category = category.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.roster_index.trim().is_empty() {
            return Err(LedgerError::validation(0, "roster_index must be non-empty"));
        }
        if self.roster_category.trim().is_empty() {
            return Err(LedgerError::validation(0, "roster_category must be non-empty"));
        }
        Ok(())
    }
}
