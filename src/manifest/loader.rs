//! Manifest loading and validation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::Manifest;
use crate::error::ManifestError;

/// File names probed for a manifest, in order.
pub const MANIFEST_FILE_NAMES: [&str; 3] = ["manifest.json", "manifest.yaml", "manifest.yml"];

/// Finds the manifest file inside a lab's test directory.
///
/// Falls back to `manifest.json` so the caller reports a sensible path when
/// nothing exists.
pub fn find_manifest(tests_dir: &Path) -> PathBuf {
    MANIFEST_FILE_NAMES
        .iter()
        .map(|name| tests_dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| tests_dir.join(MANIFEST_FILE_NAMES[0]))
}

impl Manifest {
    /// Loads and validates a manifest from disk.
    ///
    /// YAML is used for `.yaml`/`.yml` files, JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let manifest = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|message| ManifestError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        manifest.validate()?;
        debug!(
            "Loaded manifest {} with {} tests",
            path.display(),
            manifest.tests.len()
        );
        Ok(manifest)
    }

    /// Parses a manifest from JSON text without validating it.
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Parses a manifest from YAML text without validating it.
    pub fn from_yaml_str(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Validates the manifest.
    ///
    /// Test cases without any expectation are accepted but logged, since they
    /// pass for any output.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.tests.is_empty() {
            return Err(ManifestError::NoTests);
        }

        if self.timeout_sec == 0 {
            return Err(ManifestError::InvalidValue {
                field: "timeout_sec".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if !self.solution_tolerance.is_finite() {
            return Err(ManifestError::InvalidValue {
                field: "solution_tolerance".to_string(),
                message: format!("must be a finite number, got {}", self.solution_tolerance),
            });
        }

        for (idx, test) in self.tests.iter().enumerate() {
            if test.variants.is_empty() && test.expectations.is_empty() {
                warn!(
                    "Test {} ({}) declares no expectations and accepts any output",
                    idx + 1,
                    test.label()
                );
            }
            for (v_idx, variant) in test.variants.iter().enumerate() {
                if variant.expectations.is_empty() {
                    warn!(
                        "Test {} variant {} declares no expectations and accepts any output",
                        idx + 1,
                        v_idx + 1
                    );
                }
            }
        }

        Ok(())
    }
}
