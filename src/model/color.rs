//! Opaque display-color blob.
//!
//! The bytes are never interpreted; they travel as base64 in backups and
//! take part in duplicate detection by exact byte equality.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-empty binary color blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorData(Vec<u8>);

impl ColorData {
    /// Wrap raw bytes. An empty blob is treated as "no color".
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(Self(bytes))
        }
    }

    /// Decode a base64 string; `""` means no color.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the text is not valid standard base64.
    pub fn from_base64(text: &str) -> Result<Option<Self>, base64::DecodeError> {
        if text.is_empty() {
            return Ok(None);
        }
        STANDARD.decode(text).map(Self::from_bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

/// Encode an optional color the way backups expect (`""` when absent).
#[must_use]
pub fn encode_optional(color: Option<&ColorData>) -> String {
    color.map(ColorData::to_base64).unwrap_or_default()
}

impl Serialize for ColorData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for ColorData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base64(&text)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("empty color blob"))
    }
}
