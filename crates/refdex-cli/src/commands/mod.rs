//! Command implementations for the refdex CLI

mod build;
mod completions;

pub use build::execute as build;
pub use completions::generate;
