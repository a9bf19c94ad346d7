//! Capability interface implemented by every concrete generator

use std::sync::Arc;

use crate::core::config::GeneratorOptions;
use crate::core::templates::TemplateSource;
use crate::generation::Step;

/// Dependency manifest template used unless a generator overrides it
pub const DEFAULT_GEMFILE_TEMPLATE: &str = "shared/Gemfile.tt";

/// What a concrete generator contributes on top of the shared steps.
///
/// The shared steps (rack config, Gemfile, bundle install, .gitignore) are
/// composed by [`ProjectGenerator`](crate::generation::ProjectGenerator); a
/// blueprint only supplies its manifest template, its own template
/// directories and any extra steps, which run after the shared ones.
pub trait Blueprint: Send + Sync {
    /// Registry name
    fn name(&self) -> &str;

    /// One-line summary for `templates list`
    fn description(&self) -> &str {
        ""
    }

    /// Template rendered into `<location>/Gemfile`
    fn gemfile_template(&self) -> &str {
        DEFAULT_GEMFILE_TEMPLATE
    }

    /// Template directories searched before the shared assets
    fn source_paths(&self) -> Vec<TemplateSource> {
        Vec::new()
    }

    /// Steps appended after the shared steps
    fn steps(&self, _options: &GeneratorOptions) -> Vec<Step> {
        Vec::new()
    }
}

/// Shared handle to a registered generator
pub type GeneratorDescriptor = Arc<dyn Blueprint>;
