//! Render-and-materialize orchestration.
//!
//! Definitions are processed one at a time in collection order, so when two
//! definitions share an output file under [`CollisionPolicy::Overwrite`] the
//! later one's rendering is what remains on disk. Earlier definitions for that
//! file are rendered but not written ([`WriteResult::Superseded`]); if the
//! final definition fails, the latest superseded rendering is written instead.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dockergen_core::ImageDefinition;
use dockergen_renderer::TemplateEngine;

use crate::error::{definition_err, GenerateError, Step};
use crate::plan::{self, PlannedArtifact};
use crate::writer::{self, WriteResult};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to do when a single definition fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing definition. Earlier writes stay on disk.
    #[default]
    Abort,
    /// Record the failure and continue with the next definition.
    KeepGoing,
}

/// What to do when two definitions derive the same output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Later definitions overwrite earlier ones.
    #[default]
    Overwrite,
    /// Refuse the whole run before writing anything.
    Reject,
}

/// Per-run generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub output_root: PathBuf,
    pub dry_run: bool,
    pub failure_policy: FailurePolicy,
    pub collision_policy: CollisionPolicy,
}

impl GenerateOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            dry_run: false,
            failure_policy: FailurePolicy::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Outcome of a full generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// One entry per successfully processed definition, in order.
    pub outcomes: Vec<WriteResult>,
    /// [`GenerateError::Definition`] entries skipped under
    /// [`FailurePolicy::KeepGoing`].
    pub failures: Vec<GenerateError>,
}

impl GenerateReport {
    pub fn written(&self) -> usize {
        self.count(|r| matches!(r, WriteResult::Written { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|r| matches!(r, WriteResult::Unchanged { .. }))
    }

    pub fn would_write(&self) -> usize {
        self.count(|r| matches!(r, WriteResult::WouldWrite { .. }))
    }

    pub fn superseded(&self) -> usize {
        self.count(|r| matches!(r, WriteResult::Superseded { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&self, pred: impl Fn(&WriteResult) -> bool) -> usize {
        self.outcomes.iter().filter(|r| pred(r)).count()
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Renders definitions through one template and materializes the results.
#[derive(Debug)]
pub struct Generator {
    engine: TemplateEngine,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(engine: TemplateEngine, options: GenerateOptions) -> Self {
        Self { engine, options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn output_root(&self) -> &Path {
        &self.options.output_root
    }

    /// Derive every output location without rendering or writing.
    pub fn plan(&self, defs: &[ImageDefinition]) -> Result<Vec<PlannedArtifact>, GenerateError> {
        let planned = plan::plan_all(&self.options.output_root, defs)?;
        if self.options.collision_policy == CollisionPolicy::Reject {
            plan::check_collisions(&planned)?;
        }
        Ok(planned)
    }

    /// Derive the location of definition `index` and render it.
    pub fn render_one(
        &self,
        index: usize,
        def: &ImageDefinition,
    ) -> Result<(PlannedArtifact, String), GenerateError> {
        let artifact = plan::plan_one(&self.options.output_root, index, def)?;
        let content = self
            .engine
            .render(def)
            .map_err(|e| definition_err(index, artifact.label.clone(), Step::Render, e))?;
        Ok((artifact, content))
    }

    /// Derive, render and write a single definition.
    pub fn generate_one(
        &self,
        index: usize,
        def: &ImageDefinition,
    ) -> Result<WriteResult, GenerateError> {
        let (artifact, content) = self.render_one(index, def)?;
        self.write_rendered(artifact, &content)
    }

    fn write_rendered(
        &self,
        artifact: PlannedArtifact,
        content: &str,
    ) -> Result<WriteResult, GenerateError> {
        let PlannedArtifact {
            index,
            label,
            dir,
            file,
        } = artifact;
        let write = || -> Result<WriteResult, GenerateError> {
            if !self.options.dry_run {
                writer::ensure_dir(&dir)?;
            }
            writer::write_artifact(&file, content, self.options.dry_run)
        };
        write().map_err(|e| definition_err(index, label, Step::Write, e))
    }

    /// Process every definition in order.
    pub fn generate(&self, defs: &[ImageDefinition]) -> Result<GenerateReport, GenerateError> {
        self.generate_with(defs, |_| {})
    }

    /// Process every definition in order, calling `on_write` as each
    /// artifact is handled.
    ///
    /// With [`CollisionPolicy::Reject`], collisions among derivable
    /// definitions are checked before the first write.
    pub fn generate_with<F>(
        &self,
        defs: &[ImageDefinition],
        mut on_write: F,
    ) -> Result<GenerateReport, GenerateError>
    where
        F: FnMut(&WriteResult),
    {
        let planned = plan::plan_derivable(&self.options.output_root, defs);
        if self.options.collision_policy == CollisionPolicy::Reject {
            plan::check_collisions(&planned)?;
        }
        let superseded = plan::superseded(&planned);
        let files: HashMap<usize, &Path> = planned
            .iter()
            .map(|a| (a.index, a.file.as_path()))
            .collect();

        let mut report = GenerateReport::default();
        // Latest superseded rendering per output file.
        let mut pending: HashMap<PathBuf, (PlannedArtifact, String)> = HashMap::new();

        for (index, def) in defs.iter().enumerate() {
            let outcome = if superseded.contains(&index) {
                self.render_one(index, def).map(|(artifact, content)| {
                    let path = artifact.file.clone();
                    pending.insert(path.clone(), (artifact, content));
                    WriteResult::Superseded { path }
                })
            } else {
                self.generate_one(index, def)
            };

            let err = match outcome {
                Ok(result) => {
                    on_write(&result);
                    report.outcomes.push(result);
                    continue;
                }
                Err(err) => err,
            };

            let fallback = if superseded.contains(&index) {
                None
            } else {
                files.get(&index).and_then(|file| pending.remove(*file))
            };
            if let Some((artifact, content)) = fallback {
                tracing::warn!(
                    path = %artifact.file.display(),
                    index = artifact.index,
                    "final definition failed; writing superseded rendering"
                );
                match self.write_rendered(artifact, &content) {
                    Ok(result) => {
                        on_write(&result);
                        report.outcomes.push(result);
                    }
                    Err(fallback_err) => report.failures.push(fallback_err),
                }
            }

            match self.options.failure_policy {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::KeepGoing => {
                    tracing::warn!(error = %err, "skipping definition");
                    report.failures.push(err);
                }
            }
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
