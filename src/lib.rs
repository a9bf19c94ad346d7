//! Stagehand scaffolds new static-site projects from named templates.
//!
//! Templates are looked up in a [`TemplateRegistry`](crate::core::templates::TemplateRegistry)
//! holding the built-in generators plus any directories found under the local
//! templates root. A [`ProjectGenerator`](crate::generation::ProjectGenerator) then
//! runs the shared steps (rack config, Gemfile, bundle install, .gitignore)
//! followed by the generator's own.
#![deny(unsafe_code)]

pub mod core;
pub mod generation;
pub mod infrastructure;
