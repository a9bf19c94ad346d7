//! Infrastructure layer - concrete implementations of domain ports

pub mod shell;

pub use shell::*;
