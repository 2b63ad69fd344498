use std::path::PathBuf;

use thiserror::Error;

use crate::common::JsonPointer;

/// The input is not a structurally valid JSON Schema document.
///
/// Always a client input problem. `pointer` locates the offending keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON Schema at #{pointer}: {reason}")]
pub struct ParseError {
    pub pointer: JsonPointer,
    pub reason: String,
}

impl ParseError {
    pub fn new(pointer: &JsonPointer, reason: impl Into<String>) -> Self {
        Self {
            pointer: pointer.clone(),
            reason: reason.into(),
        }
    }
}

/// A well-formed schema tree that has no Avro equivalent under the mapping policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("unrepresentable: no Avro type for schema at #{pointer} ({detail})")]
    Unrepresentable { pointer: JsonPointer, detail: String },

    #[error("unsupported-multitype: schema at #{pointer} declares several types {kinds:?}")]
    UnsupportedMultitype {
        pointer: JsonPointer,
        kinds: Vec<String>,
    },

    #[error("depth-exceeded: schema at #{pointer} nests deeper than {limit} levels")]
    DepthExceeded { pointer: JsonPointer, limit: usize },
}

impl TranslationError {
    /// Stable, client-facing error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslationError::Unrepresentable { .. } => "unrepresentable",
            TranslationError::UnsupportedMultitype { .. } => "unsupported-multitype",
            TranslationError::DepthExceeded { .. } => "depth-exceeded",
        }
    }

    pub fn pointer(&self) -> &JsonPointer {
        match self {
            TranslationError::Unrepresentable { pointer, .. }
            | TranslationError::UnsupportedMultitype { pointer, .. }
            | TranslationError::DepthExceeded { pointer, .. } => pointer,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translate(#[from] TranslationError),

    #[error("failed to encode Avro schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
