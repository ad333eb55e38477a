//! `dockergen diff` — show unified diffs for what generate would write.

use anyhow::{Context, Result};
use clap::Args;

use dockergen_generate::{diff_definitions, CollisionPolicy, GenerateOptions, Generator};

use super::source::{self, SourceArgs};

/// Arguments for `dockergen diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fail if two definitions map to the same path.
    #[arg(long)]
    pub reject_collisions: bool,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let config = self.source.resolve()?;
        let definitions = source::load_definitions(&config)?;
        let engine = source::load_template(&config)?;

        let mut options = GenerateOptions::new(config.output_root.clone());
        if self.reject_collisions {
            options.collision_policy = CollisionPolicy::Reject;
        }
        let generator = Generator::new(engine, options);

        let diffs = diff_definitions(&generator, &definitions).context("diff failed")?;

        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
