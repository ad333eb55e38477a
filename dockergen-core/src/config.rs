//! Generator configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! `dockergen.yaml`, then explicit CLI flags (applied by the caller).
//!
//! Relative paths inside a config file are resolved against the directory
//! holding that file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "dockergen.yaml";

pub const DEFAULT_DEFINITIONS: &str = "versions.json";
pub const DEFAULT_TEMPLATE: &str = "Dockerfile.template";
pub const DEFAULT_OUTPUT_ROOT: &str = "dockerfiles";

/// Where to read definitions and the template, and where to write output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Definitions file (`.json`, `.yaml`, `.yml`).
    pub definitions: PathBuf,
    /// Template file rendered once per definition.
    pub template: PathBuf,
    /// Root directory for the generated tree.
    pub output_root: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            definitions: PathBuf::from(DEFAULT_DEFINITIONS),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }
}

impl GeneratorConfig {
    /// Load a config file. Missing keys keep their defaults.
    pub fn load_at(path: &Path) -> Result<Self, CoreError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CoreError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(io_err(path, e)),
        };
        let config: GeneratorConfig =
            serde_yaml::from_str(&contents).map_err(|e| CoreError::ParseYaml {
                path: path.to_path_buf(),
                source: e,
            })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.anchored_at(base))
    }

    /// Load `<dir>/dockergen.yaml` if present, otherwise the defaults.
    pub fn discover(dir: &Path) -> Result<Self, CoreError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load_at(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve relative paths against `base`. Absolute paths are untouched.
    pub fn anchored_at(self, base: &Path) -> Self {
        Self {
            definitions: base.join(self.definitions),
            template: base.join(self.template),
            output_root: base.join(self.output_root),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
