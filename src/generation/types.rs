//! Core types for the generation domain

use std::fmt;
use std::path::PathBuf;

use crate::core::config::GeneratorOptions;

/// Predicate deciding whether a step runs for the given options
pub type Gate = fn(&GeneratorOptions) -> bool;

/// Work performed by a single generation step. Paths in `destination` are
/// relative to the project location; template paths are resolved through the
/// generator's source paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Render a text template into the destination
    Render {
        template: String,
        destination: PathBuf,
    },
    /// Copy a file byte-for-byte
    Copy { source: String, destination: PathBuf },
    /// Copy every file of a template directory, preserving relative paths
    Directory { source: String, destination: PathBuf },
    /// Create a directory
    EmptyDirectory { destination: PathBuf },
    /// Run the dependency install command inside the project location
    Install { command: String },
}

impl Action {
    pub fn render(template: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self::Render {
            template: template.into(),
            destination: destination.into(),
        }
    }

    pub fn copy(source: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self::Copy {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn directory(source: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self::Directory {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn empty_directory(destination: impl Into<PathBuf>) -> Self {
        Self::EmptyDirectory {
            destination: destination.into(),
        }
    }
}

/// One gated entry of a generator's step list
#[derive(Debug, Clone)]
pub struct Step {
    pub name: &'static str,
    pub gate: Gate,
    pub action: Action,
}

impl Step {
    /// A step that runs only when `gate` holds
    pub fn gated(name: &'static str, gate: Gate, action: Action) -> Self {
        Self { name, gate, action }
    }

    /// A step that always runs
    pub fn always(name: &'static str, action: Action) -> Self {
        Self::gated(name, |_| true, action)
    }

    pub fn is_enabled(&self, options: &GeneratorOptions) -> bool {
        (self.gate)(options)
    }
}

/// Outcome of a single file or command action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// New file or directory written
    Create,
    /// Destination already held identical content
    Identical,
    /// Differing destination overwritten because of `--force`
    Force,
    /// Directory already present
    Exist,
    /// External command executed
    Run,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Identical => "identical",
            Self::Force => "force",
            Self::Exist => "exist",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line of the generation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub step: &'static str,
    pub status: FileStatus,
    /// Destination path, or the command line for [`FileStatus::Run`]
    pub target: String,
}

/// Everything a generator did, in execution order
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub entries: Vec<ReportEntry>,
}

impl GenerationReport {
    pub(crate) fn record(&mut self, step: &'static str, status: FileStatus, target: String) {
        self.entries.push(ReportEntry {
            step,
            status,
            target,
        });
    }

    /// Names of the steps that produced at least one entry, in order
    pub fn executed_steps(&self) -> Vec<&'static str> {
        let mut steps: Vec<&'static str> = Vec::new();
        for entry in &self.entries {
            if steps.last() != Some(&entry.step) {
                steps.push(entry.step);
            }
        }
        steps
    }

    /// Whether a file or directory action of this run already targeted `target`
    pub fn wrote(&self, target: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.status != FileStatus::Run && e.target == target)
    }

    /// Whether an entry targets a path ending with `suffix`
    pub fn touched(&self, suffix: &str) -> bool {
        self.entries.iter().any(|e| e.target.ends_with(suffix))
    }
}
