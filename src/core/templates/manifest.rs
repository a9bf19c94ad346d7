//! Manifest format for local templates.
//!
//! A local template directory may ship a `template.yml` describing how it is
//! generated instead of being copied verbatim:
//!
//! ```yaml
//! name: blog
//! description: Blog skeleton with an article layout
//! gemfile_template: Gemfile.tt
//! files:
//!   - source: config.tt
//!     destination: config.rb
//!   - source: source/index.html.erb
//!     destination: source/index.html.erb
//!     render: false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

/// File name that marks a local template as manifest-driven
pub const MANIFEST_FILE_NAME: &str = "template.yml";

/// Extension marking a file as a template to render
pub const TEMPLATE_EXTENSION: &str = ".tt";

/// The root manifest structure for a local template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Registry name; defaults to the directory name
    #[serde(default)]
    pub name: Option<String>,

    /// A short description shown by `templates list`
    #[serde(default)]
    pub description: Option<String>,

    /// Dependency manifest template, relative to the template directory
    #[serde(default)]
    pub gemfile_template: Option<String>,

    /// Additional files emitted after the shared steps
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

/// Describes a single file to be generated from a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Path to the template file, relative to the template directory
    pub source: String,

    /// Destination path, relative to the project location
    pub destination: String,

    /// Render through the template engine instead of copying verbatim.
    /// Defaults to rendering files ending in `.tt`.
    #[serde(default)]
    pub render: Option<bool>,
}

impl ManifestFile {
    pub fn should_render(&self) -> bool {
        self.render
            .unwrap_or_else(|| self.source.ends_with(TEMPLATE_EXTENSION))
    }
}

impl TemplateManifest {
    /// Load the manifest file of a template directory
    pub fn load_from_dir(template_dir: &Path) -> Result<Self> {
        let manifest_path = template_dir.join(MANIFEST_FILE_NAME);
        debug!(manifest_path = %manifest_path.display(), "Reading template manifest");

        let content =
            fs::read_to_string(&manifest_path).map_err(|e| Error::filesystem(&manifest_path, e))?;

        let manifest: Self = serde_yaml::from_str(&content).map_err(|e| Error::Manifest {
            path: manifest_path.clone(),
            message: e.to_string(),
        })?;

        manifest.validate().map_err(|message| Error::Manifest {
            path: manifest_path,
            message,
        })?;
        Ok(manifest)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name must not be empty".to_string());
            }
        }
        for file in &self.files {
            if file.source.trim().is_empty() || file.destination.trim().is_empty() {
                return Err("every file needs a source and a destination".to_string());
            }
        }
        Ok(())
    }
}
