//! Configuration for a scaffolding run.
//!
//! Two records drive generation:
//!
//! - [`GeneratorOptions`] is the per-invocation configuration chosen on the
//!   command line (template name and the flags gating each step).
//! - [`Settings`] is environment-derived configuration: where local templates
//!   live and whether the process runs in test mode.
//!
//! Environment access goes through the [`ConfigReader`] trait so tests can
//! inject controlled values instead of mutating the process environment.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

/// Name of the template used when none is requested
pub const DEFAULT_TEMPLATE: &str = "default";

/// Environment variable naming the local-templates root
pub const TEMPLATES_DIR_ENV: &str = "STAGEHAND_TEMPLATES_DIR";

/// Environment variable enabling test mode
pub const TEST_MODE_ENV: &str = "TEST";

/// Directory under the home directory holding local templates
const LOCAL_TEMPLATES_DIR_NAME: &str = ".stagehand";

/// Per-invocation generator configuration.
///
/// Serialized as-is into the template rendering context, so every field is
/// available to templates under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorOptions {
    /// Registry entry to generate from
    pub template: String,

    /// Emit a Rack `config.ru`
    pub rack: bool,

    /// Do not run the dependency install command
    pub skip_bundle: bool,

    /// Do not emit a `.gitignore`
    pub skip_git: bool,

    /// Stylesheet directory name inside `source/`
    pub css_dir: String,

    /// Javascript directory name inside `source/`
    pub js_dir: String,

    /// Image directory name inside `source/`
    pub images_dir: String,

    /// Overwrite destination files whose content differs
    pub force: bool,

    /// Report actions without touching the filesystem
    pub pretend: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            rack: false,
            skip_bundle: false,
            skip_git: false,
            css_dir: "stylesheets".to_string(),
            js_dir: "javascripts".to_string(),
            images_dir: "images".to_string(),
            force: false,
            pretend: false,
        }
    }
}

/// Trait for reading environment configuration, allowing dependency injection for testing
pub trait ConfigReader {
    fn templates_dir(&self) -> Option<String>;
    fn test_mode(&self) -> Option<String>;
}

/// Production implementation that reads from environment variables
pub struct EnvConfigReader;

impl ConfigReader for EnvConfigReader {
    fn templates_dir(&self) -> Option<String> {
        std::env::var(TEMPLATES_DIR_ENV).ok()
    }

    fn test_mode(&self) -> Option<String> {
        std::env::var_os(TEST_MODE_ENV).map(|value| value.to_string_lossy().into_owned())
    }
}

/// In-memory implementation for tests
#[derive(Debug, Default, Clone)]
pub struct StaticConfigReader {
    pub templates_dir: Option<String>,
    pub test_mode: Option<String>,
}

impl ConfigReader for StaticConfigReader {
    fn templates_dir(&self) -> Option<String> {
        self.templates_dir.clone()
    }

    fn test_mode(&self) -> Option<String> {
        self.test_mode.clone()
    }
}

/// Environment-derived settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Root scanned for local templates; `None` when no root can be determined
    pub templates_dir: Option<PathBuf>,

    /// Suppresses the dependency install command
    pub test_mode: bool,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Self {
        Self::load(&EnvConfigReader)
    }

    /// Load settings through the given reader
    pub fn load(reader: &dyn ConfigReader) -> Self {
        let templates_dir = reader
            .templates_dir()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(LOCAL_TEMPLATES_DIR_NAME)));

        // Any value, even empty or "0", enables test mode
        let test_mode = reader.test_mode().is_some();

        debug!(?templates_dir, test_mode, "Loaded settings");
        Self {
            templates_dir,
            test_mode,
        }
    }

    /// Replace the local-templates root, typically from `--templates-dir`
    pub fn with_templates_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.templates_dir = dir;
        }
        self
    }
}
