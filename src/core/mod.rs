//! Core data structures for vb.
//!
//! This module contains the foundational types used throughout vb:
//! - Package names and specs, and the package registry
//! - Projects and target platforms
//! - Errors and warnings

pub mod errors;
pub mod package;
pub mod platform;
pub mod project;
pub mod registry;

pub use errors::{VbError, VbWarning};
pub use package::{PackageName, PackageScope, PackageSpec};
pub use platform::TargetPlatform;
pub use project::Project;
pub use registry::Registry;
