//! Supported languages and source detection.

use std::path::{Path, PathBuf};

/// Languages a submission can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    C,
    Cpp,
    Java,
    Go,
}

impl Language {
    /// All languages, in detection order.
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::Go,
    ];

    /// Returns the display name for this language.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Go => "Go",
        }
    }

    /// Conventional entry-point file name.
    pub fn source_file_name(&self) -> &'static str {
        match self {
            Language::Python => "main.py",
            Language::C => "main.c",
            Language::Cpp => "main.cpp",
            Language::Java => "Main.java",
            Language::Go => "main.go",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "c" => Ok(Language::C),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            "java" => Ok(Language::Java),
            "go" | "golang" => Ok(Language::Go),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

/// A detected submission entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSource {
    pub language: Language,
    pub path: PathBuf,
}

/// Capability: find the submission's language and entry point in a directory.
pub trait SourceDetector: Send + Sync {
    fn detect(&self, dir: &Path) -> Option<DetectedSource>;
}

/// Detector probing the conventional file names in [`Language::ALL`] order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalLayout;

impl SourceDetector for ConventionalLayout {
    fn detect(&self, dir: &Path) -> Option<DetectedSource> {
        Language::ALL.iter().find_map(|&language| {
            let path = dir.join(language.source_file_name());
            path.is_file().then_some(DetectedSource { language, path })
        })
    }
}
