//! Runtime access to the site configuration.
//!
//! [`SiteConfigLoader::load_config`] picks one load strategy (compiled
//! artifact, live document, or built-in fallback), applies the design
//! tokens to a [`StyleSink`] and memoizes the resulting [`SiteConfig`].
//! All accessors behave the same whichever strategy was taken.

pub mod defaults;
pub mod error;
pub mod fetch;
mod loader;
pub mod site;
pub mod style;

pub use defaults::fallback_configuration;
pub use error::{FetchError, LoadError};
pub use fetch::{DocumentFetcher, FileFetcher, HttpFetcher, fetcher_for};
pub use loader::{ArtifactSource, DEFAULT_SOURCE, SiteConfigBuilder, SiteConfigLoader};
pub use site::{AccreditationStatus, Provenance, SiteConfig, ToggleListener};
pub use sitecfg_toggles::ToggleError;
pub use style::{NullStyleSink, RecordingStyleSink, StyleSink, apply_styles};
