//! Ordered template search paths.
//!
//! A generator resolves every template file it renders or copies by walking an
//! ordered list of [`TemplateSource`]s and taking the first hit. Generator
//! specific directories come first; the embedded shared assets are always
//! appended last, so a generator can shadow any shared file by shipping one
//! with the same relative path.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::EmbeddedTemplates;
use crate::core::error::{Error, Result};

/// Where template files are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates located on the filesystem, rooted at the given directory
    Filesystem(PathBuf),

    /// Templates embedded in the binary at compile time
    Embedded,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filesystem(root) => write!(f, "{}", root.display()),
            Self::Embedded => write!(f, "<embedded>"),
        }
    }
}

impl TemplateSource {
    /// Read `relative` from this source, `Ok(None)` when it is not present
    fn read_file(&self, relative: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Self::Filesystem(root) => {
                let path = root.join(relative);
                if !path.is_file() {
                    return Ok(None);
                }
                fs::read(&path)
                    .map(Some)
                    .map_err(|e| Error::filesystem(&path, e))
            }
            Self::Embedded => Ok(EmbeddedTemplates::read(relative)),
        }
    }

    /// Every file below `relative`, `Ok(None)` when the directory is not present
    fn read_dir(&self, relative: &str) -> Result<Option<Vec<(String, Vec<u8>)>>> {
        match self {
            Self::Filesystem(root) => {
                let dir = if relative.is_empty() {
                    root.clone()
                } else {
                    root.join(relative)
                };
                if !dir.is_dir() {
                    return Ok(None);
                }
                read_tree(&dir).map(Some)
            }
            Self::Embedded => Ok(EmbeddedTemplates::read_dir(relative)),
        }
    }
}

/// A template file found on the search path
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    /// Path as requested, relative to its source
    pub path: String,
    pub contents: Vec<u8>,
    pub origin: TemplateSource,
}

/// Ordered list of template sources.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    sources: Vec<TemplateSource>,
}

impl SourcePaths {
    /// Build the search path from generator-specific sources followed by the
    /// embedded shared assets.
    pub fn new(generator_sources: Vec<TemplateSource>) -> Self {
        let mut sources = generator_sources;
        sources.push(TemplateSource::Embedded);
        Self { sources }
    }

    pub fn sources(&self) -> &[TemplateSource] {
        &self.sources
    }

    /// Find a template file, searching sources in order
    pub fn find_file(&self, relative: &str) -> Result<TemplateAsset> {
        for source in &self.sources {
            if let Some(contents) = source.read_file(relative)? {
                debug!(template = %relative, origin = %source, "Resolved template file");
                return Ok(TemplateAsset {
                    path: relative.to_string(),
                    contents,
                    origin: source.clone(),
                });
            }
        }
        Err(self.not_found(relative))
    }

    /// Find a template directory, searching sources in order. The first source
    /// containing the directory supplies all of its files.
    pub fn find_dir(&self, relative: &str) -> Result<Vec<TemplateAsset>> {
        for source in &self.sources {
            if let Some(files) = source.read_dir(relative)? {
                debug!(
                    directory = %relative,
                    origin = %source,
                    files = files.len(),
                    "Resolved template directory"
                );
                return Ok(files
                    .into_iter()
                    .map(|(path, contents)| TemplateAsset {
                        path,
                        contents,
                        origin: source.clone(),
                    })
                    .collect());
            }
        }
        Err(self.not_found(relative))
    }

    fn not_found(&self, relative: &str) -> Error {
        Error::TemplateFileNotFound {
            path: relative.to_string(),
            searched: self.sources.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Read every regular file below `dir`, keyed by `/`-separated relative path
fn read_tree(dir: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::filesystem(&path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(dir)
            .map_err(|e| Error::config(format!("Failed to relativize {}: {e}", path.display())))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let contents = fs::read(path).map_err(|e| Error::filesystem(path, e))?;
        files.push((relative, contents));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_is_always_last() {
        let paths = SourcePaths::new(vec![TemplateSource::Filesystem(PathBuf::from("/a"))]);
        assert_eq!(
            paths.sources(),
            &[
                TemplateSource::Filesystem(PathBuf::from("/a")),
                TemplateSource::Embedded
            ]
        );
    }

    #[test]
    fn test_generator_source_shadows_shared_asset() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("shared")).unwrap();
        fs::write(temp_dir.path().join("shared/gitignore"), "custom\n").unwrap();

        let paths = SourcePaths::new(vec![TemplateSource::Filesystem(
            temp_dir.path().to_path_buf(),
        )]);
        let asset = paths.find_file("shared/gitignore").unwrap();

        assert_eq!(asset.contents, b"custom\n");
        assert!(matches!(asset.origin, TemplateSource::Filesystem(_)));
    }

    #[test]
    fn test_falls_back_to_embedded() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SourcePaths::new(vec![TemplateSource::Filesystem(
            temp_dir.path().to_path_buf(),
        )]);

        let asset = paths.find_file("shared/Gemfile.tt").unwrap();
        assert_eq!(asset.origin, TemplateSource::Embedded);
        assert_eq!(
            asset.contents,
            EmbeddedTemplates::read("shared/Gemfile.tt").unwrap()
        );
    }

    #[test]
    fn test_missing_file_reports_every_source() {
        let paths = SourcePaths::new(vec![TemplateSource::Filesystem(PathBuf::from(
            "/nonexistent/templates",
        ))]);

        match paths.find_file("shared/missing.tt").unwrap_err() {
            Error::TemplateFileNotFound { path, searched } => {
                assert_eq!(path, "shared/missing.tt");
                assert_eq!(searched, vec!["/nonexistent/templates", "<embedded>"]);
            }
            other => panic!("Expected TemplateFileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_find_dir_on_filesystem() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("site/source/layouts")).unwrap();
        fs::write(root.join("site/source/index.html"), "<h1>hi</h1>").unwrap();
        fs::write(root.join("site/source/layouts/layout.erb"), "<%= yield %>").unwrap();

        let paths = SourcePaths::new(vec![TemplateSource::Filesystem(root.to_path_buf())]);
        let files = paths.find_dir("site/source").unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(names, vec!["index.html", "layouts/layout.erb"]);
    }

    #[test]
    fn test_find_dir_empty_relative_reads_whole_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.md"), "# readme").unwrap();

        let paths = SourcePaths::new(vec![TemplateSource::Filesystem(
            temp_dir.path().to_path_buf(),
        )]);
        let files = paths.find_dir("").unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "README.md");
    }

    #[test]
    fn test_find_dir_missing() {
        let paths = SourcePaths::new(Vec::new());
        let err = paths.find_dir("nope/source").unwrap_err();
        assert!(matches!(err, Error::TemplateFileNotFound { .. }));
    }
}
