//! # dockergen-renderer
//!
//! Tera-based template engine that renders one Dockerfile per image
//! definition. The definition's full key set is the template's variable set.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dockergen_core::ImageDefinition;
//! use dockergen_renderer::TemplateEngine;
//!
//! fn render_one(def: &ImageDefinition) {
//!     if let Ok(engine) = TemplateEngine::from_file(Path::new("Dockerfile.template")) {
//!         if let Ok(text) = engine.render(def) {
//!             println!("{} bytes", text.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::to_tera_context;
pub use engine::TemplateEngine;
pub use error::RenderError;
