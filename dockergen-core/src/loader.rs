//! Definition loader.
//!
//! Reads a `{ "docker_images": [...] }` document from disk. The format is
//! picked from the file extension: `.json`, or `.yaml` / `.yml`.
//!
//! Every failure here is an input error: callers must not write anything when
//! loading fails.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{io_err, CoreError};
use crate::types::{DefinitionSet, ImageDefinition};

/// Serialization format of a definitions file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Pick the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(SourceFormat::Json),
            Some("yaml") | Some("yml") => Ok(SourceFormat::Yaml),
            _ => Err(CoreError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load the ordered definition collection from `path`.
///
/// Returns `CoreError::NotFound` if the file is absent, and
/// `CoreError::ParseJson` / `CoreError::ParseYaml` (with path + line context)
/// if it is malformed or holds non-scalar values.
pub fn load_definitions(path: &Path) -> Result<Vec<ImageDefinition>, CoreError> {
    let format = SourceFormat::from_path(path)?;
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CoreError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(io_err(path, e)),
    };
    parse_definitions(&contents, format, path)
}

/// Parse an in-memory definitions document. `path` is only used for errors.
pub fn parse_definitions(
    contents: &str,
    format: SourceFormat,
    path: &Path,
) -> Result<Vec<ImageDefinition>, CoreError> {
    let set: DefinitionSet = match format {
        SourceFormat::Json => serde_json::from_str(contents).map_err(|e| CoreError::ParseJson {
            path: path.to_path_buf(),
            source: e,
        })?,
        SourceFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| CoreError::ParseYaml {
            path: path.to_path_buf(),
            source: e,
        })?,
    };
    Ok(set.docker_images)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarValue;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("versions.json")).unwrap(),
            SourceFormat::Json
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("versions.YML")).unwrap(),
            SourceFormat::Yaml
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("versions.toml")),
            Err(CoreError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn yaml_versions_stay_strings() {
        let yaml = "docker_images:\n  - comfyui_version: v0.3.9\n    cuda_version: 12.4.0\n    flavor: devel\n";
        let defs = parse_definitions(yaml, SourceFormat::Yaml, &PathBuf::from("v.yaml"))
            .expect("parse");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].get("cuda_version"), Some(&ScalarValue::from("12.4.0")));
    }

    #[test]
    fn malformed_json_reports_path() {
        let err = parse_definitions("{ nope", SourceFormat::Json, Path::new("bad.json"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
