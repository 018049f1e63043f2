//! Build-time compiler for the site configuration.
//!
//! Parses the source document once, pre-renders the repeated cards,
//! flattens design tokens and feature toggles, and writes everything into
//! a single script that the page loads before any other script runs.

pub mod cards;
mod compile;
pub mod error;
pub mod script;

pub use cards::CardRenderer;
pub use compile::{
    CompileReport, Compiler, CompilerOptions, DEFAULT_OUTPUT, DEFAULT_SOURCE, compile_document,
};
pub use error::CompileError;
pub use script::generate_script;
