use std::path::PathBuf;
use thiserror::Error;

/// The main error type for shapedraw's file and command-line layer.
///
/// Geometry, classification and reconciliation never fail; only reading and
/// writing files or interpreting arguments can.
#[derive(Debug, Error)]
pub enum ShapeDrawError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse shapes JSON from {path}: {source}")]
    ShapesJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write shapes JSON to {path}: {source}")]
    ShapesJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse draw context JSON from {path}: {source}")]
    ContextJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse draw context YAML from {path}: {source}")]
    ContextYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize output as JSON: {0}")]
    OutputJson(#[source] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
