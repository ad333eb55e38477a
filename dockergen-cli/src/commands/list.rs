//! `dockergen list` — show where each definition's Dockerfile goes.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use dockergen_core::paths::{flavor_segment, COMFYUI_VERSION_KEY, CUDA_VERSION_KEY};
use dockergen_core::ImageDefinition;
use dockergen_generate::plan::plan_one;

use super::source::{self, SourceArgs};

/// Arguments for `dockergen list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListEntryJson<'a> {
    index: usize,
    output: Option<String>,
    error: Option<String>,
    variables: &'a ImageDefinition,
}

#[derive(Tabled)]
struct ListTableRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "comfyui")]
    comfyui: String,
    #[tabled(rename = "cuda")]
    cuda: String,
    #[tabled(rename = "flavor")]
    flavor: String,
    #[tabled(rename = "dockerfile")]
    output: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let config = self.source.resolve()?;
        let definitions = source::load_definitions(&config)?;

        let planned: Vec<_> = definitions
            .iter()
            .enumerate()
            .map(|(index, def)| plan_one(&config.output_root, index, def))
            .collect();

        if self.json {
            let entries: Vec<ListEntryJson<'_>> = definitions
                .iter()
                .zip(&planned)
                .enumerate()
                .map(|(index, (def, plan))| ListEntryJson {
                    index,
                    output: plan.as_ref().ok().map(|p| p.file.display().to_string()),
                    error: plan.as_ref().err().map(ToString::to_string),
                    variables: def,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if definitions.is_empty() {
            println!("No image definitions in '{}'.", config.definitions.display());
            return Ok(());
        }

        let rows: Vec<ListTableRow> = definitions
            .iter()
            .zip(&planned)
            .enumerate()
            .map(|(index, (def, plan))| ListTableRow {
                index,
                comfyui: def.text(COMFYUI_VERSION_KEY).unwrap_or_else(|| "-".to_string()),
                cuda: def.text(CUDA_VERSION_KEY).unwrap_or_else(|| "-".to_string()),
                flavor: flavor_segment(def),
                output: match plan {
                    Ok(p) => p.file.display().to_string(),
                    Err(e) => format!("{} {e}", "error:".red()),
                },
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
