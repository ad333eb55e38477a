//! Template context: the whole definition, exposed as top-level variables.

use dockergen_core::ImageDefinition;

use crate::error::RenderError;

/// Build a [`tera::Context`] holding every key of `def`.
///
/// No key is filtered or renamed; `{{ comfyui_version }}` and
/// `{{ any_extra_field }}` resolve the same way.
pub fn to_tera_context(def: &ImageDefinition) -> Result<tera::Context, RenderError> {
    tera::Context::from_serialize(def).map_err(RenderError::from)
}
