//! dockergen core library — image definitions, path derivation, loading,
//! configuration, errors.
//!
//! Public API surface:
//! - [`types`] — [`ImageDefinition`] and its scalar values
//! - [`paths`] — output directory derivation
//! - [`loader`] — read a definition collection from JSON or YAML
//! - [`config`] — [`GeneratorConfig`] with file + default layering
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod loader;
pub mod paths;
pub mod types;

pub use config::GeneratorConfig;
pub use error::CoreError;
pub use types::{DefinitionSet, ImageDefinition, ScalarValue};
