//! Stagehand core library
//!
//! Configuration, errors and the template system shared by every generator.

pub mod config;
pub mod error;
pub mod templates;

pub use error::Error;
