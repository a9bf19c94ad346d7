//! Generation domain module - turns a resolved generator into files on disk
//!
//! A run resolves a template name through the
//! [`TemplateRegistry`](crate::core::templates::TemplateRegistry), builds a
//! [`ProjectGenerator`] for the requested location and executes its gated
//! steps in order.

pub mod builtin;
pub mod generator;
pub mod local;
pub mod traits;
pub mod types;

pub use builtin::*;
pub use generator::*;
pub use local::*;
pub use traits::*;
pub use types::*;

use std::path::Path;
use std::sync::Arc;

use crate::core::config::{GeneratorOptions, Settings};
use crate::core::error::Result;
use crate::core::templates::TemplateRegistry;
use crate::infrastructure::shell::CommandExecutor;

/// Resolve `options.template` and generate a project at `location`.
///
/// Nothing is written when the template name is not registered.
pub fn scaffold(
    registry: &TemplateRegistry,
    location: &Path,
    options: GeneratorOptions,
    settings: &Settings,
    executor: Arc<dyn CommandExecutor>,
) -> Result<GenerationReport> {
    let blueprint = registry.resolve(&options.template)?;
    ProjectGenerator::new(blueprint, location, options, settings, executor)?.generate()
}
