//! # dockergen-generate
//!
//! Render-and-materialize engine.
//!
//! Build a [`Generator`] from a [`TemplateEngine`](dockergen_renderer::TemplateEngine)
//! and [`GenerateOptions`], then call [`Generator::generate`] with the loaded
//! definitions. Each definition becomes
//! `<output_root>/comfyui-<v>/cuda-<c>/<flavor>/Dockerfile`.

pub mod diff;
pub mod error;
pub mod generator;
pub mod plan;
pub mod writer;

pub use diff::{diff_definitions, FileDiff};
pub use error::{GenerateError, Step};
pub use generator::{CollisionPolicy, FailurePolicy, GenerateOptions, GenerateReport, Generator};
pub use plan::PlannedArtifact;
pub use writer::{write_artifact, WriteResult};
