//! The build-time artifact shared between the compiler and the runtime.
//!
//! The compiler embeds the serialized [`CompiledArtifact`] in a generated
//! script between [`PAYLOAD_START`] and [`PAYLOAD_END`]; the runtime reads it
//! back from the same markers without executing any script.

use crate::model::Configuration;
use crate::style::StyleTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const PAYLOAD_START: &str = "/*@sitecfg-payload*/";
pub const PAYLOAD_END: &str = "/*@end-sitecfg-payload*/";

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact payload markers not found")]
    MissingPayload,
    #[error("Artifact payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the runtime needs to skip live parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledArtifact {
    /// Set by the generated script once the payload has been assigned.
    pub loaded: bool,
    /// Source document path as given to the compiler.
    pub source: String,
    /// Hex SHA-256 of the source document bytes.
    pub source_digest: String,
    pub config: Configuration,
    /// Pre-rendered card markup, by template name then position.
    pub templates: BTreeMap<String, Vec<String>>,
    pub css_vars: StyleTable,
    /// Flattened `path -> enabled` feature toggles.
    pub feature_map: BTreeMap<String, bool>,
}

impl CompiledArtifact {
    /// Extracts the artifact from a generated script.
    pub fn from_script(script: &str) -> Result<Self, ArtifactError> {
        let start = script
            .find(PAYLOAD_START)
            .ok_or(ArtifactError::MissingPayload)?
            + PAYLOAD_START.len();
        let len = script[start..]
            .find(PAYLOAD_END)
            .ok_or(ArtifactError::MissingPayload)?;
        Ok(serde_json::from_str(script[start..start + len].trim())?)
    }

    pub fn template(&self, name: &str, index: usize) -> &str {
        self.templates
            .get(name)
            .and_then(|t| t.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn template_count(&self) -> usize {
        self.templates.values().map(Vec::len).sum()
    }
}
