//! Registry mapping template names to generators.
//!
//! The registry is built once at startup by [`TemplateRegistry::discover`] and
//! handed by reference to whatever resolves template names. Registration is
//! last-write-wins: registering a name twice replaces the earlier generator,
//! which is how a local template directory overrides a built-in one.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::manifest::{MANIFEST_FILE_NAME, TemplateManifest};
use crate::core::error::{Error, Result};
use crate::generation::{
    Blueprint, GeneratorDescriptor, LocalBlueprint, ManifestBlueprint, builtin_generators,
};

#[derive(Default, Clone)]
pub struct TemplateRegistry {
    entries: BTreeMap<String, GeneratorDescriptor>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name` when both arguments are present; otherwise a
    /// plain read. Always returns the full mapping.
    pub fn register(
        &mut self,
        name: Option<&str>,
        generator: Option<GeneratorDescriptor>,
    ) -> &BTreeMap<String, GeneratorDescriptor> {
        if let (Some(name), Some(generator)) = (name, generator) {
            if self.entries.insert(name.to_string(), generator).is_some() {
                debug!(template = %name, "Replaced registered generator");
            } else {
                debug!(template = %name, "Registered generator");
            }
        }
        &self.entries
    }

    pub fn registered(&self) -> &BTreeMap<String, GeneratorDescriptor> {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<GeneratorDescriptor> {
        self.entries.get(name).cloned()
    }

    /// Look up `name`, failing with [`Error::TemplateNotFound`]
    pub fn resolve(&self, name: &str) -> Result<GeneratorDescriptor> {
        self.get(name)
            .ok_or_else(|| Error::template_not_found(name))
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// A registry holding only the built-in generators
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for generator in builtin_generators() {
            let name = generator.name().to_string();
            registry.register(Some(&name), Some(generator));
        }
        registry
    }

    /// Built-in generators followed by every template directory found under
    /// `templates_root`.
    ///
    /// A directory with a `template.yml` becomes a manifest-defined generator;
    /// any other directory is copied verbatim. A missing root adds nothing.
    ///
    /// # Errors
    ///
    /// Fails only when an existing root cannot be listed. Broken manifests are
    /// logged and skipped.
    pub fn discover(templates_root: Option<&Path>) -> Result<Self> {
        let mut registry = Self::with_builtins();

        let Some(root) = templates_root else {
            return Ok(registry);
        };
        if !root.is_dir() {
            debug!(root = %root.display(), "No local templates directory");
            return Ok(registry);
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(root).map_err(|e| Error::filesystem(root, e))? {
            let entry = entry.map_err(|e| Error::filesystem(root, e))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();

        for dir in dirs {
            let Some(dir_name) = dir.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };

            let generator: GeneratorDescriptor = if dir.join(MANIFEST_FILE_NAME).is_file() {
                match TemplateManifest::load_from_dir(&dir) {
                    Ok(manifest) => Arc::new(ManifestBlueprint::new(&dir_name, &dir, manifest)),
                    Err(e) => {
                        warn!(directory = %dir.display(), error = %e, "Skipping local template");
                        continue;
                    }
                }
            } else {
                Arc::new(LocalBlueprint::new(&dir_name, &dir))
            };

            let name = generator.name().to_string();
            info!(template = %name, directory = %dir.display(), "Found local template");
            registry.register(Some(&name), Some(generator));
        }

        Ok(registry)
    }
}
