//! Shared template assets embedded in the binary at compile time.
//!
//! Every file under the crate's `templates/` directory is compiled in with
//! `rust-embed`, so a freshly installed binary can scaffold projects without
//! any template files on disk. Paths are always `/`-separated and relative to
//! `templates/`, e.g. `shared/Gemfile.tt`.

use rust_embed::RustEmbed;

/// Container for all templates embedded at compile time.
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Read an embedded file by its relative path
    pub fn read(path: &str) -> Option<Vec<u8>> {
        Self::get(path).map(|file| file.data.into_owned())
    }

    /// All embedded files below `dir`, as `(path relative to dir, contents)`,
    /// sorted by path. Returns `None` when nothing lives under `dir`.
    pub fn read_dir(dir: &str) -> Option<Vec<(String, Vec<u8>)>> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));

        let mut files: Vec<(String, Vec<u8>)> = Self::iter()
            .filter_map(|path| {
                let relative = path.strip_prefix(prefix.as_str())?.to_string();
                Self::read(&path).map(|contents| (relative, contents))
            })
            .collect();

        if files.is_empty() {
            return None;
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Some(files)
    }
}
