//! Output planning: derive every artifact path before anything is written.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use dockergen_core::paths::{definition_label, derive_output_dir, DOCKERFILE_NAME};
use dockergen_core::ImageDefinition;

use crate::error::{definition_err, GenerateError, Step};

/// Where one definition's Dockerfile will land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    /// Position in the definition collection.
    pub index: usize,
    /// `comfyui-<v>/cuda-<c>/<flavor>`.
    pub label: String,
    /// Derived output directory.
    pub dir: PathBuf,
    /// `dir/Dockerfile`.
    pub file: PathBuf,
}

/// Derive the artifact location for definition `index`.
pub fn plan_one(
    root: &Path,
    index: usize,
    def: &ImageDefinition,
) -> Result<PlannedArtifact, GenerateError> {
    let label = definition_label(index, def);
    let dir = derive_output_dir(root, def)
        .map_err(|e| definition_err(index, label.clone(), Step::Derive, e))?;
    let file = dir.join(DOCKERFILE_NAME);
    Ok(PlannedArtifact {
        index,
        label,
        dir,
        file,
    })
}

/// Derive every artifact location, failing on the first underivable one.
pub fn plan_all(
    root: &Path,
    defs: &[ImageDefinition],
) -> Result<Vec<PlannedArtifact>, GenerateError> {
    defs.iter()
        .enumerate()
        .map(|(index, def)| plan_one(root, index, def))
        .collect()
}

/// Derive the location of every definition that has one, skipping the rest.
///
/// Underivable definitions are reported later, when they are processed.
pub fn plan_derivable(root: &Path, defs: &[ImageDefinition]) -> Vec<PlannedArtifact> {
    defs.iter()
        .enumerate()
        .filter_map(|(index, def)| plan_one(root, index, def).ok())
        .collect()
}

/// Indices of artifacts whose file is derived again by a later definition.
///
/// Under last-writer-wins only the final definition for each file decides
/// its content.
pub fn superseded(planned: &[PlannedArtifact]) -> HashSet<usize> {
    let mut last: HashMap<&Path, usize> = HashMap::new();
    for artifact in planned {
        last.insert(artifact.file.as_path(), artifact.index);
    }
    planned
        .iter()
        .filter(|a| last.get(a.file.as_path()) != Some(&a.index))
        .map(|a| a.index)
        .collect()
}

/// Fail with [`GenerateError::Collision`] on the first pair of artifacts
/// sharing an output file, in collection order.
pub fn check_collisions(planned: &[PlannedArtifact]) -> Result<(), GenerateError> {
    let mut seen: HashMap<&Path, usize> = HashMap::new();
    for artifact in planned {
        if let Some(first) = seen.insert(artifact.file.as_path(), artifact.index) {
            return Err(GenerateError::Collision {
                path: artifact.file.clone(),
                first,
                second: artifact.index,
            });
        }
    }
    Ok(())
}
