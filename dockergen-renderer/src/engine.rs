//! Tera rendering engine — [`TemplateEngine`].
//!
//! One engine holds exactly one compiled template. Template syntax errors are
//! reported when the engine is built, before any definition is rendered;
//! undefined variables are reported per render call.

use std::path::{Path, PathBuf};

use tera::Tera;

use dockergen_core::ImageDefinition;

use crate::context::to_tera_context;
use crate::error::RenderError;

/// Name under which an in-memory template is registered.
pub const INLINE_TEMPLATE_NAME: &str = "Dockerfile.template";

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn template_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| INLINE_TEMPLATE_NAME.to_string())
}

fn build_tera(name: &str, source: &str) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    // Dockerfiles are plain text; never HTML-escape substituted values.
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, source)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine rendering a single template against image definitions.
///
/// Create once with [`TemplateEngine::from_file`] or
/// [`TemplateEngine::from_source`] and reuse for every definition.
pub struct TemplateEngine {
    tera: Tera,
    name: String,
    origin: Option<PathBuf>,
}

impl TemplateEngine {
    /// Load and compile the template at `path`.
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let name = template_name(path);
        let tera = build_tera(&name, &source)?;
        Ok(TemplateEngine {
            tera,
            name,
            origin: Some(path.to_path_buf()),
        })
    }

    /// Compile an in-memory template.
    pub fn from_source(source: &str) -> Result<Self, RenderError> {
        let tera = build_tera(INLINE_TEMPLATE_NAME, source)?;
        Ok(TemplateEngine {
            tera,
            name: INLINE_TEMPLATE_NAME.to_string(),
            origin: None,
        })
    }

    /// Registered template name (the file name, or [`INLINE_TEMPLATE_NAME`]).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the template was loaded from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Render the template with every key of `def` bound as a variable.
    pub fn render(&self, def: &ImageDefinition) -> Result<String, RenderError> {
        let ctx = to_tera_context(def)?;
        self.render_with_context(&ctx)
    }

    /// Render using a caller-provided [`tera::Context`].
    pub fn render_with_context(&self, ctx: &tera::Context) -> Result<String, RenderError> {
        Ok(self.tera.render(&self.name, ctx)?)
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
