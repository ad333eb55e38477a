//! Error types for dockergen-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error: syntax errors, undefined variables.
    #[error("template engine error: {}", describe(.0))]
    Tera(#[from] tera::Error),

    /// Filesystem error while loading the template file.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

/// Tera nests the useful message ("Variable `x` not found in context ...")
/// in its source chain; flatten it so a single line tells the whole story.
fn describe(err: &tera::Error) -> String {
    let mut msg = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    msg
}
