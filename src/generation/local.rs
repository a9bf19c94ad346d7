//! Generators backed by directories under the local-templates root

use std::path::{Path, PathBuf};

use crate::core::config::GeneratorOptions;
use crate::core::templates::{TemplateManifest, TemplateSource};
use crate::generation::{Action, Blueprint, DEFAULT_GEMFILE_TEMPLATE, Step};

/// Copies a template directory verbatim into the project location
pub struct LocalBlueprint {
    name: String,
    root: PathBuf,
}

impl LocalBlueprint {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Blueprint for LocalBlueprint {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Local template, copied verbatim"
    }

    fn source_paths(&self) -> Vec<TemplateSource> {
        vec![TemplateSource::Filesystem(self.root.clone())]
    }

    fn steps(&self, _options: &GeneratorOptions) -> Vec<Step> {
        // An empty source resolves to the template root itself
        vec![Step::always("scaffold", Action::directory("", ""))]
    }
}

/// Generator described by a local `template.yml`
pub struct ManifestBlueprint {
    name: String,
    root: PathBuf,
    manifest: TemplateManifest,
}

impl ManifestBlueprint {
    /// `fallback_name` is used when the manifest does not name the template
    pub fn new(
        fallback_name: impl Into<String>,
        root: impl Into<PathBuf>,
        manifest: TemplateManifest,
    ) -> Self {
        let name = manifest
            .name
            .clone()
            .unwrap_or_else(|| fallback_name.into());
        Self {
            name,
            root: root.into(),
            manifest,
        }
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }
}

impl Blueprint for ManifestBlueprint {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.manifest
            .description
            .as_deref()
            .unwrap_or("Local template")
    }

    fn gemfile_template(&self) -> &str {
        self.manifest
            .gemfile_template
            .as_deref()
            .unwrap_or(DEFAULT_GEMFILE_TEMPLATE)
    }

    fn source_paths(&self) -> Vec<TemplateSource> {
        vec![TemplateSource::Filesystem(self.root.clone())]
    }

    fn steps(&self, _options: &GeneratorOptions) -> Vec<Step> {
        self.manifest
            .files
            .iter()
            .map(|file| {
                let action = if file.should_render() {
                    Action::render(&file.source, &file.destination)
                } else {
                    Action::copy(&file.source, &file.destination)
                };
                Step::always("scaffold", action)
            })
            .collect()
    }
}
