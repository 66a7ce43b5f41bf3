//! Configuration for a harness run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::error::LabError;
use crate::manifest::find_manifest;
use crate::toolchain::{Language, DEFAULT_PYTHON};

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Lab(#[from] LabError),
}

/// Where a lab lives and how to launch it.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Repository root containing `labs/`, `tests/` and `.build/`.
    pub root: PathBuf,
    /// Lab identifier, usually a number.
    pub lab: String,
    /// Command used when no known source file exists.
    pub run_cmd: Option<String>,
    /// Python interpreter for Python submissions.
    pub python: String,
    /// Skip detection and assume this language.
    pub language: Option<Language>,
    /// Print outputs and expected answers for failed tests regardless of the manifest.
    pub show_answers: bool,
}

impl HarnessConfig {
    /// Creates a configuration for `lab` under `root` with defaults.
    pub fn new(root: impl Into<PathBuf>, lab: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            lab: lab.into(),
            run_cmd: None,
            python: DEFAULT_PYTHON.to_string(),
            language: None,
            show_answers: false,
        }
    }

    /// Sets the fallback run command.
    pub fn with_run_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.run_cmd = Some(cmd.into());
        self
    }

    /// Sets the Python interpreter.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Forces the submission language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Forces answers to be shown on failure.
    pub fn with_show_answers(mut self, show: bool) -> Self {
        self.show_answers = show;
        self
    }

    fn lab_dir_name(&self) -> String {
        format!("lab-{}", self.lab)
    }

    /// Directory with the student's sources.
    pub fn lab_dir(&self) -> PathBuf {
        self.root.join("labs").join(self.lab_dir_name())
    }

    /// Directory with the manifest, inputs and expectations.
    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("tests").join(self.lab_dir_name())
    }

    /// Gets the manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        find_manifest(&self.tests_dir())
    }

    /// Directory for compiled artifacts.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(".build").join(self.lab_dir_name())
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lab = self.lab.trim();
        if lab.is_empty() {
            return Err(ConfigError::ValidationFailed("lab cannot be empty".to_string()));
        }
        if lab.contains(['/', '\\']) || lab.contains("..") {
            return Err(ConfigError::ValidationFailed(format!(
                "lab '{}' must not contain path separators",
                self.lab
            )));
        }
        if self.python.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "python interpreter cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

static LAB_BRANCH: OnceLock<Regex> = OnceLock::new();

fn lab_branch() -> &'static Regex {
    LAB_BRANCH.get_or_init(|| Regex::new(r"(?i)lab[-_]?(\d+)").expect("lab branch pattern is valid"))
}

/// Determines the lab number.
///
/// `LAB` wins when set; otherwise the number is taken from a `lab-N`,
/// `lab_N` or `labN` branch name in `GITHUB_HEAD_REF` or `GITHUB_REF_NAME`.
/// `env` is the variable lookup, normally `std::env::var(..).ok()`.
pub fn detect_lab<F>(env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(explicit) = env("LAB").map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        return Some(explicit);
    }

    let branch = env("GITHUB_HEAD_REF")
        .filter(|v| !v.is_empty())
        .or_else(|| env("GITHUB_REF_NAME"))
        .unwrap_or_default();
    lab_branch()
        .captures(&branch)
        .map(|caps| caps[1].to_string())
}

/// Detects the lab from the process environment.
pub fn detect_lab_from_env() -> Result<String, LabError> {
    detect_lab(|key| std::env::var(key).ok()).ok_or(LabError::Undetermined)
}

/// Appends `lab=<lab>` to a CI output file.
pub fn write_lab_output(path: &Path, lab: &str) -> Result<(), LabError> {
    let output_error = |source: std::io::Error| LabError::Output {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(output_error)?;
    writeln!(file, "lab={}", lab).map_err(output_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_paths() {
        let config = HarnessConfig::new("/repo", "3");
        assert_eq!(config.lab_dir(), PathBuf::from("/repo/labs/lab-3"));
        assert_eq!(config.tests_dir(), PathBuf::from("/repo/tests/lab-3"));
        assert_eq!(config.manifest_path(), PathBuf::from("/repo/tests/lab-3/manifest.json"));
        assert_eq!(config.build_dir(), PathBuf::from("/repo/.build/lab-3"));
    }

    #[test]
    fn test_builder() {
        let config = HarnessConfig::new(".", "1")
            .with_run_cmd("./solution")
            .with_python("pypy3")
            .with_language(Language::Python)
            .with_show_answers(true);
        assert_eq!(config.run_cmd.as_deref(), Some("./solution"));
        assert_eq!(config.python, "pypy3");
        assert_eq!(config.language, Some(Language::Python));
        assert!(config.show_answers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(HarnessConfig::new(".", " ").validate().is_err());
        assert!(HarnessConfig::new(".", "../etc").validate().is_err());
        assert!(HarnessConfig::new(".", "2").with_python("").validate().is_err());
    }

    #[test]
    fn test_detect_lab_explicit() {
        let env = env_of(&[("LAB", " 4 "), ("GITHUB_HEAD_REF", "lab-7")]);
        assert_eq!(detect_lab(env), Some("4".to_string()));
    }

    #[test]
    fn test_detect_lab_from_branch() {
        assert_eq!(detect_lab(env_of(&[("GITHUB_HEAD_REF", "feature/Lab_12-fix")])), Some("12".into()));
        assert_eq!(detect_lab(env_of(&[("GITHUB_REF_NAME", "lab5")])), Some("5".into()));
        assert_eq!(
            detect_lab(env_of(&[("GITHUB_HEAD_REF", ""), ("GITHUB_REF_NAME", "lab-2")])),
            Some("2".into())
        );
    }

    #[test]
    fn test_detect_lab_none() {
        assert_eq!(detect_lab(env_of(&[("GITHUB_REF_NAME", "main")])), None);
        assert_eq!(detect_lab(env_of(&[("LAB", "  ")])), None);
    }

    #[test]
    fn test_write_lab_output_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");
        std::fs::write(&path, "other=1\n").unwrap();

        write_lab_output(&path, "3").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "other=1\nlab=3\n");
    }
}
