//! Command implementations

pub mod build;
pub mod clean;
pub mod completions;
pub mod ini;
pub mod new;
pub mod run;
