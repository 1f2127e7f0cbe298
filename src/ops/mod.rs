//! High-level operations.
//!
//! This module contains the implementation of vb commands.

pub mod vb_build;
pub mod vb_clean;
pub mod vb_new;
pub mod vcs;

pub use vb_build::{
    build, discover, load_settings, run_binary, BuildOptions, BuildOutcome, Discovered,
};
pub use vb_clean::clean;
pub use vb_new::{new_project, NewOptions};
