//! Error types for dockergen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading definitions or deriving paths.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure, annotated with the path being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definitions or config file did not exist at the expected path.
    #[error("file not found at {path}")]
    NotFound { path: PathBuf },

    /// JSON parse error on load — includes line/column context from serde_json.
    #[error("failed to parse JSON at {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error on load — includes line context from serde_yaml.
    #[error("failed to parse YAML at {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// File extension is neither `.json` nor `.yaml`/`.yml`.
    #[error("unsupported definitions format at {path}; expected .json, .yaml or .yml")]
    UnsupportedFormat { path: PathBuf },

    /// A field required for path derivation is absent, null or empty.
    #[error("required field `{field}` is missing or empty")]
    MissingField { field: &'static str },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
