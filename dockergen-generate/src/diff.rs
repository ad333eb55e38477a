//! Dry-run unified diff support for `dockergen diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use dockergen_core::ImageDefinition;

use crate::error::{definition_err, io_err, GenerateError, Step};
use crate::generator::{CollisionPolicy, Generator};
use crate::plan;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub index: usize,
    pub label: String,
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what `generate` would produce and compare it to on-disk content.
///
/// No files or directories are written. Definitions whose output already
/// matches are omitted, as are definitions superseded by a later one for the
/// same file. Any failure aborts the diff.
pub fn diff_definitions(
    generator: &Generator,
    defs: &[ImageDefinition],
) -> Result<Vec<FileDiff>, GenerateError> {
    let planned = plan::plan_derivable(generator.output_root(), defs);
    if generator.options().collision_policy == CollisionPolicy::Reject {
        plan::check_collisions(&planned)?;
    }
    let superseded = plan::superseded(&planned);

    let mut diffs = Vec::new();
    for (index, def) in defs.iter().enumerate() {
        let (artifact, rendered) = generator.render_one(index, def)?;
        if superseded.contains(&index) {
            continue;
        }
        let existing = read_existing_or_empty(&artifact.file)
            .map_err(|e| definition_err(index, artifact.label.clone(), Step::Write, e))?;
        if existing == rendered {
            continue;
        }

        let relative = artifact
            .file
            .strip_prefix(generator.output_root())
            .unwrap_or(artifact.file.as_path());
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            index,
            label: artifact.label,
            path: artifact.file,
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

/// Missing files compare as empty so new artifacts show as pure additions.
fn read_existing_or_empty(path: &Path) -> Result<String, GenerateError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use dockergen_renderer::TemplateEngine;
    use tempfile::TempDir;

    use crate::generator::GenerateOptions;

    use super::*;

    fn defs() -> Vec<ImageDefinition> {
        vec![ImageDefinition::new()
            .with("comfyui_version", "v0.3.9")
            .with("cuda_version", "12.4.0")
            .with("base_image", "nvidia/cuda:12.4.0")]
    }

    fn make_generator(root: &Path) -> Generator {
        let engine = TemplateEngine::from_source("FROM {{ base_image }}\nWORKDIR /app\n").unwrap();
        Generator::new(engine, GenerateOptions::new(root))
    }

    #[test]
    fn no_diffs_after_clean_generate() {
        let tmp = TempDir::new().expect("tmp");
        let gen = make_generator(tmp.path());
        gen.generate(&defs()).expect("generate");

        let diffs = diff_definitions(&gen, &defs()).expect("diff");
        assert!(diffs.is_empty(), "generated tree should have no diff");
    }

    #[test]
    fn missing_output_is_pure_addition() {
        let tmp = TempDir::new().expect("tmp");
        let gen = make_generator(tmp.path());
        let diffs = diff_definitions(&gen, &defs()).expect("diff");
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].unified_diff.contains("+FROM nvidia/cuda:12.4.0"));
        assert!(!tmp.path().join("comfyui-v0.3.9").exists(), "diff must not write");
    }

    #[test]
    fn local_edit_produces_unified_diff() {
        let tmp = TempDir::new().expect("tmp");
        let gen = make_generator(tmp.path());
        gen.generate(&defs()).expect("generate");

        let target = tmp.path().join("comfyui-v0.3.9/cuda-12.4.0/runtime/Dockerfile");
        fs::write(&target, "FROM ubuntu:22.04\nWORKDIR /app\n").expect("write");

        let diffs = diff_definitions(&gen, &defs()).expect("diff");
        assert_eq!(diffs.len(), 1);
        let d = &diffs[0].unified_diff;
        assert!(d.contains("--- a/comfyui-v0.3.9/cuda-12.4.0/runtime/Dockerfile"), "{d}");
        assert!(d.contains("+++ b/comfyui-v0.3.9/cuda-12.4.0/runtime/Dockerfile"), "{d}");
        assert!(d.contains("-FROM ubuntu:22.04"));
        assert!(d.contains("+FROM nvidia/cuda:12.4.0"));
        assert!(d.contains("@@"));
    }

    #[test]
    fn colliding_definitions_have_no_diff_after_generate() {
        let tmp = TempDir::new().expect("tmp");
        let gen = make_generator(tmp.path());
        let colliding = vec![
            defs()[0].clone().with("base_image", "a"),
            defs()[0].clone().with("base_image", "b"),
        ];

        let before = diff_definitions(&gen, &colliding).expect("diff");
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].index, 1);
        assert!(before[0].unified_diff.contains("+FROM b"));

        gen.generate(&colliding).expect("generate");
        let after = diff_definitions(&gen, &colliding).expect("diff");
        assert!(after.is_empty(), "got {after:?}");
    }
}
