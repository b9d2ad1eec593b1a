//! Record ↔ bytes encoding.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Result;

/// Wire format used for every aggregate snapshot written to the ledger.
///
/// `Json` matches what external readers of the ledger expect; `Bitcode` is
/// the compact binary form. A ledger must be read with the codec it was
/// written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    Json,
    Bitcode,
}

impl Codec {
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            Codec::Json => Ok(serde_json::to_vec(value)?),
            Codec::Bitcode => Ok(bitcode::serialize(value)?),
        }
    }

    /// Decode `bytes`, returning the codec's own error text on failure so
    /// callers can attach key and version context.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, String> {
        match self {
            Codec::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Codec::Bitcode => bitcode::deserialize(bytes).map_err(|e| e.to_string()),
        }
    }
}
