//! Template system for project scaffolding.
//!
//! Templates are resolved through an ordered list of sources: directories
//! belonging to a generator, then the shared assets embedded in the binary.
//! The [`TemplateRegistry`] maps template names to the generators that use
//! them.

pub mod embedded;
pub mod manifest;
pub mod registry;
pub mod source;

pub use embedded::*;
pub use manifest::*;
pub use registry::*;
pub use source::*;
