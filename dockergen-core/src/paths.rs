//! Output directory derivation.
//!
//! # Layout
//!
//! ```text
//! <output_root>/
//!   comfyui-<comfyui_version>/
//!     cuda-<cuda_version>/
//!       <flavor | "runtime">/
//!         Dockerfile
//! ```
//!
//! Values are taken verbatim; nothing is normalised beyond `Path::join`.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::types::ImageDefinition;

pub const COMFYUI_VERSION_KEY: &str = "comfyui_version";
pub const CUDA_VERSION_KEY: &str = "cuda_version";
pub const FLAVOR_KEY: &str = "flavor";

/// Flavor used when a definition has no (or an empty) `flavor`.
pub const DEFAULT_FLAVOR: &str = "runtime";

/// Fixed file name written inside every derived directory.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// `"comfyui-<version>"`.
pub fn version_segment(def: &ImageDefinition) -> Result<String, CoreError> {
    required(def, COMFYUI_VERSION_KEY).map(|v| format!("comfyui-{v}"))
}

/// `"cuda-<version>"`.
pub fn cuda_segment(def: &ImageDefinition) -> Result<String, CoreError> {
    required(def, CUDA_VERSION_KEY).map(|v| format!("cuda-{v}"))
}

/// `flavor` verbatim, or [`DEFAULT_FLAVOR`].
pub fn flavor_segment(def: &ImageDefinition) -> String {
    def.text(FLAVOR_KEY)
        .unwrap_or_else(|| DEFAULT_FLAVOR.to_string())
}

/// `comfyui-<v>/cuda-<c>/<flavor>` — relative to the output root.
pub fn derive_relative(def: &ImageDefinition) -> Result<PathBuf, CoreError> {
    Ok(PathBuf::from(version_segment(def)?)
        .join(cuda_segment(def)?)
        .join(flavor_segment(def)))
}

/// `<root>/comfyui-<v>/cuda-<c>/<flavor>`.
pub fn derive_output_dir(root: &Path, def: &ImageDefinition) -> Result<PathBuf, CoreError> {
    Ok(root.join(derive_relative(def)?))
}

/// Human-readable identity for messages: the relative path with `/`
/// separators, or `#<index>` when the path cannot be derived.
pub fn definition_label(index: usize, def: &ImageDefinition) -> String {
    match (version_segment(def), cuda_segment(def)) {
        (Ok(v), Ok(c)) => format!("{v}/{c}/{}", flavor_segment(def)),
        _ => format!("#{index}"),
    }
}

fn required(def: &ImageDefinition, field: &'static str) -> Result<String, CoreError> {
    def.text(field).ok_or(CoreError::MissingField { field })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
