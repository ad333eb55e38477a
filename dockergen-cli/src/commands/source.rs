//! Arguments shared by every subcommand: where inputs and output live.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dockergen_core::{loader, GeneratorConfig, ImageDefinition};
use dockergen_renderer::TemplateEngine;

/// Input/output locations. Flags override the config file.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Config file (default: ./dockergen.yaml when present).
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Definitions file with a top-level `docker_images` list (.json, .yaml, .yml).
    #[arg(long, short = 'd', value_name = "FILE")]
    pub definitions: Option<PathBuf>,

    /// Template rendered once per definition.
    #[arg(long, short = 't', value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Root directory of the generated tree.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl SourceArgs {
    /// Defaults, then config file, then flags.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load_at(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => GeneratorConfig::discover(Path::new("."))
                .context("failed to load ./dockergen.yaml")?,
        };
        if let Some(definitions) = &self.definitions {
            config.definitions = definitions.clone();
        }
        if let Some(template) = &self.template {
            config.template = template.clone();
        }
        if let Some(output) = &self.output {
            config.output_root = output.clone();
        }
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

pub fn load_definitions(config: &GeneratorConfig) -> Result<Vec<ImageDefinition>> {
    loader::load_definitions(&config.definitions).with_context(|| {
        format!(
            "failed to load definitions from '{}'",
            config.definitions.display()
        )
    })
}

pub fn load_template(config: &GeneratorConfig) -> Result<TemplateEngine> {
    TemplateEngine::from_file(&config.template)
        .with_context(|| format!("failed to load template '{}'", config.template.display()))
}
