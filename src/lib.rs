//! Site configuration pipeline.
//!
//! A single XML document holds the site's content and settings. It is
//! either compiled ahead of time into a script artifact
//! ([`Compiler`]), or parsed live by the runtime
//! ([`SiteConfigLoader`]), which falls back to built-in defaults when
//! neither is available.

pub mod watch;

pub use sitecfg_compiler::{
    CompileError, CompileReport, Compiler, CompilerOptions, compile_document, generate_script,
};
pub use sitecfg_document::{DocumentError, parse, to_document};
pub use sitecfg_runtime::{
    DocumentFetcher, FetchError, FileFetcher, HttpFetcher, Provenance, RecordingStyleSink,
    SiteConfig, SiteConfigBuilder, SiteConfigLoader, StyleSink, ToggleListener,
};
pub use sitecfg_toggles::{ToggleError, is_enabled};
pub use sitecfg_types::{CompiledArtifact, Configuration, Node, StyleTable, ToggleNode};

pub mod types {
    pub use sitecfg_types::*;
}
