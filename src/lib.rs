//! vb - a build helper for Vala applications
//!
//! This crate provides the core library functionality for vb: discovering
//! the packages and version a project uses from its source, keeping the
//! project's settings file in step with them, compiling, and assembling a
//! redistributable directory and archive.

pub mod builder;
pub mod core;
pub mod discovery;
pub mod dist;
pub mod ops;
pub mod settings;
pub mod util;

/// Test utilities for vb unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides project fixtures and a recording source
/// reader.
#[cfg(test)]
pub mod test_support;

pub use core::{errors::VbError, package::PackageName, project::Project, registry::Registry};
pub use settings::ProjectConfig;
pub use util::context::GlobalContext;
