//! Error types for dockergen-generate.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use dockergen_core::CoreError;
use dockergen_renderer::RenderError;

/// Stage of per-definition processing at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Output path derivation.
    Derive,
    /// Template rendering.
    Render,
    /// Directory creation or file write.
    Write,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Derive => write!(f, "derive"),
            Step::Render => write!(f, "render"),
            Step::Write => write!(f, "write"),
        }
    }
}

/// All errors that can arise from generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Definition loading or path derivation error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One definition failed; carries its identity and the failing step.
    #[error("definition #{index}{} failed at {step} step: {source}", label_suffix(.index, .label))]
    Definition {
        index: usize,
        label: String,
        step: Step,
        #[source]
        source: Box<GenerateError>,
    },

    /// Two definitions derive the same output file.
    #[error("output collision at {path}: definitions #{first} and #{second} derive the same path")]
    Collision {
        path: PathBuf,
        first: usize,
        second: usize,
    },
}

impl GenerateError {
    /// Index of the failing definition, when the error is tied to one.
    pub fn definition_index(&self) -> Option<usize> {
        match self {
            GenerateError::Definition { index, .. } => Some(*index),
            GenerateError::Collision { second, .. } => Some(*second),
            _ => None,
        }
    }

    /// Failing step, for [`GenerateError::Definition`].
    pub fn step(&self) -> Option<Step> {
        match self {
            GenerateError::Definition { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// ` (<label>)`, or nothing when the label is only the `#<index>` fallback.
fn label_suffix(index: &usize, label: &str) -> String {
    if label == format!("#{index}") {
        String::new()
    } else {
        format!(" ({label})")
    }
}

/// Convenience constructor for [`GenerateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}

/// Wrap `source` as a failure of definition `index` at `step`.
pub(crate) fn definition_err(
    index: usize,
    label: impl Into<String>,
    step: Step,
    source: impl Into<GenerateError>,
) -> GenerateError {
    GenerateError::Definition {
        index,
        label: label.into(),
        step,
        source: Box::new(source.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_label_once() {
        let missing = CoreError::MissingField {
            field: "cuda_version",
        };
        let err = definition_err(0, "#0", Step::Derive, missing);
        assert!(err.to_string().starts_with("definition #0 failed at derive step"), "{err}");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = definition_err(3, "comfyui-v0.3.9/cuda-12.4.0/runtime", Step::Write, io_err("x", io));
        assert!(
            err.to_string()
                .starts_with("definition #3 (comfyui-v0.3.9/cuda-12.4.0/runtime) failed at write step"),
            "{err}"
        );
    }
}
