//! `dockergen generate` — render and write one Dockerfile per definition.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use dockergen_generate::{
    CollisionPolicy, FailurePolicy, GenerateOptions, GenerateReport, Generator, WriteResult,
};

use super::source::{self, SourceArgs};

/// Arguments for `dockergen generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip failing definitions instead of aborting; exit non-zero at the end.
    #[arg(long)]
    pub keep_going: bool,

    /// Fail before writing anything if two definitions map to the same path.
    #[arg(long)]
    pub reject_collisions: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let config = self.source.resolve()?;
        let definitions = source::load_definitions(&config)?;
        let engine = source::load_template(&config)?;

        let options = GenerateOptions {
            output_root: config.output_root.clone(),
            dry_run: self.dry_run,
            failure_policy: if self.keep_going {
                FailurePolicy::KeepGoing
            } else {
                FailurePolicy::Abort
            },
            collision_policy: if self.reject_collisions {
                CollisionPolicy::Reject
            } else {
                CollisionPolicy::Overwrite
            },
        };
        let generator = Generator::new(engine, options);

        let report = generator
            .generate_with(&definitions, print_result)
            .context("generation aborted")?;

        print_summary(&report, self.dry_run);

        if !report.is_success() {
            for failure in &report.failures {
                eprintln!("{} {failure}", "✗".red().bold());
            }
            bail!("{} definition(s) failed", report.failures.len());
        }
        Ok(())
    }
}

fn print_result(result: &WriteResult) {
    match result {
        WriteResult::Written { path } => println!("Generated {}", path.display()),
        WriteResult::WouldWrite { path } => println!("[dry-run] Would generate {}", path.display()),
        WriteResult::Unchanged { path } => println!("Unchanged {}", path.display()),
        WriteResult::Superseded { path } => {
            println!("Superseded {} (a later definition writes it)", path.display())
        }
    }
}

fn print_summary(report: &GenerateReport, dry_run: bool) {
    if report.outcomes.is_empty() && report.failures.is_empty() {
        println!("Nothing to do: no image definitions found.");
        return;
    }
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let written = if dry_run {
        report.would_write()
    } else {
        report.written()
    };
    let superseded = match report.superseded() {
        0 => String::new(),
        n => format!(", {n} superseded"),
    };
    println!(
        "{prefix}{} {} generated, {} unchanged{superseded}, {} failed",
        "✓".green().bold(),
        written,
        report.unchanged(),
        report.failures.len()
    );
}
