use crate::defaults::fallback_configuration;
use crate::error::LoadError;
use crate::fetch::{DocumentFetcher, fetcher_for};
use crate::site::{Provenance, SiteConfig};
use crate::style::{NullStyleSink, StyleSink};
use log::{debug, info, warn};
use sitecfg_types::CompiledArtifact;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

pub const DEFAULT_SOURCE: &str = "config/site-config.xml";

/// Where the compiled artifact comes from, if anywhere.
#[derive(Debug, Clone, Default)]
pub enum ArtifactSource {
    #[default]
    None,
    /// An artifact already in memory.
    Loaded(Box<CompiledArtifact>),
    /// A generated script on disk. A missing or unreadable file counts as
    /// no artifact.
    Script(PathBuf),
}

/// A builder for creating a [`SiteConfigLoader`].
pub struct SiteConfigBuilder {
    artifact: ArtifactSource,
    source: String,
    fetcher: Option<Arc<dyn DocumentFetcher>>,
    style_sink: Arc<dyn StyleSink>,
    debug_toggles: bool,
}

impl Default for SiteConfigBuilder {
    fn default() -> Self {
        Self {
            artifact: ArtifactSource::None,
            source: DEFAULT_SOURCE.to_string(),
            fetcher: None,
            style_sink: Arc::new(NullStyleSink),
            debug_toggles: false,
        }
    }
}

impl SiteConfigBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Uses an in-memory compiled artifact. It is only adopted when marked
    /// loaded.
    pub fn with_artifact(mut self, artifact: CompiledArtifact) -> Self {
        self.artifact = ArtifactSource::Loaded(Box::new(artifact));
        self
    }

    /// Reads the compiled artifact from a generated script at load time.
    pub fn with_artifact_script<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.artifact = ArtifactSource::Script(path.into());
        self
    }

    /// Location of the source document for the live-parse path.
    pub fn with_source(mut self, location: impl Into<String>) -> Self {
        self.source = location.into();
        self
    }

    /// Overrides the fetcher otherwise chosen from the source location.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_style_sink(mut self, sink: Arc<dyn StyleSink>) -> Self {
        self.style_sink = sink;
        self
    }

    /// Allows in-memory toggle overrides on the loaded configuration.
    pub fn with_debug_toggles(mut self, enabled: bool) -> Self {
        self.debug_toggles = enabled;
        self
    }

    pub fn build(self) -> SiteConfigLoader {
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Arc::from(fetcher_for(&self.source)));
        SiteConfigLoader {
            artifact: self.artifact,
            source: self.source,
            fetcher,
            style_sink: self.style_sink,
            debug_toggles: self.debug_toggles,
            cell: OnceCell::new(),
        }
    }
}

/// Loads the site configuration once and hands out the shared result.
///
/// Construct one loader at startup and pass it to everything that needs
/// configuration.
pub struct SiteConfigLoader {
    artifact: ArtifactSource,
    source: String,
    fetcher: Arc<dyn DocumentFetcher>,
    style_sink: Arc<dyn StyleSink>,
    debug_toggles: bool,
    cell: OnceCell<Arc<SiteConfig>>,
}

impl SiteConfigLoader {
    pub fn builder() -> SiteConfigBuilder {
        SiteConfigBuilder::new()
    }

    /// Returns the active configuration, loading it on first use.
    ///
    /// Concurrent first callers share one load. Never fails: the compiled
    /// artifact is preferred, then the live document, then the built-in
    /// fallback. Styles are applied before this returns.
    pub async fn load_config(&self) -> Arc<SiteConfig> {
        self.cell.get_or_init(|| self.initialize()).await.clone()
    }

    /// The configuration, if a load has already completed.
    pub fn loaded(&self) -> Option<Arc<SiteConfig>> {
        self.cell.get().cloned()
    }

    async fn initialize(&self) -> Arc<SiteConfig> {
        let start = Instant::now();

        let site = match self.compiled_artifact().await {
            Some(artifact) => SiteConfig::from_artifact(artifact, self.debug_toggles),
            None => match self.fetch_and_parse().await {
                Ok(config) => {
                    SiteConfig::from_config(Provenance::Parsed, config, self.debug_toggles)
                }
                Err(e) => {
                    warn!("Falling back to built-in configuration: {e}");
                    SiteConfig::from_config(
                        Provenance::Fallback,
                        fallback_configuration(),
                        self.debug_toggles,
                    )
                }
            },
        };

        site.apply_styles(self.style_sink.as_ref());
        info!(
            "Site configuration loaded ({}) in {:.1}ms",
            site.provenance(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Arc::new(site)
    }

    async fn compiled_artifact(&self) -> Option<CompiledArtifact> {
        let artifact = match &self.artifact {
            ArtifactSource::None => return None,
            ArtifactSource::Loaded(artifact) => artifact.as_ref().clone(),
            ArtifactSource::Script(path) => {
                let script = match tokio::fs::read_to_string(path).await {
                    Ok(script) => script,
                    Err(e) => {
                        debug!("No compiled artifact at {}: {e}", path.display());
                        return None;
                    }
                };
                match CompiledArtifact::from_script(&script) {
                    Ok(artifact) => artifact,
                    Err(e) => {
                        warn!("Ignoring compiled artifact at {}: {e}", path.display());
                        return None;
                    }
                }
            }
        };
        artifact.loaded.then_some(artifact)
    }

    async fn fetch_and_parse(&self) -> Result<sitecfg_types::Configuration, LoadError> {
        debug!("Fetching '{}' with {}", self.source, self.fetcher.name());
        let raw = self.fetcher.fetch(&self.source).await?;
        Ok(sitecfg_document::parse(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::style::RecordingStyleSink;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const DOC: &str = r#"<site-config>
        <company><name>Acme Builders</name></company>
        <branding><colors><primary>#1a3a5c</primary></colors></branding>
        <services>
            <service id="kitchens"><name>Kitchens</name></service>
            <service id="bathrooms"><name>Bathrooms</name></service>
        </services>
    </site-config>"#;

    enum Reply {
        Document(&'static str),
        Offline,
    }

    struct StubFetcher {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DocumentFetcher for StubFetcher {
        async fn fetch(&self, location: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            match self.reply {
                Reply::Document(doc) => Ok(doc.to_string()),
                Reply::Offline => Err(FetchError::NotFound(location.to_string())),
            }
        }

        fn name(&self) -> &'static str {
            "StubFetcher"
        }
    }

    #[tokio::test]
    async fn test_parsed_path_applies_styles() {
        let fetcher = StubFetcher::new(Reply::Document(DOC));
        let sink = Arc::new(RecordingStyleSink::new());
        let loader = SiteConfigLoader::builder()
            .with_fetcher(fetcher.clone())
            .with_style_sink(sink.clone())
            .build();

        let site = loader.load_config().await;
        assert_eq!(site.provenance(), Provenance::Parsed);
        assert_eq!(site.company().name, "Acme Builders");
        assert_eq!(sink.get("--color-primary").as_deref(), Some("#1a3a5c"));
    }

    #[tokio::test]
    async fn test_compiled_artifact_skips_fetch() {
        let fetcher = StubFetcher::new(Reply::Offline);
        let mut artifact = CompiledArtifact {
            loaded: true,
            ..Default::default()
        };
        artifact.config.company.name = "Compiled Co".to_string();
        artifact
            .templates
            .insert("service-card".to_string(), vec!["<div>card</div>".to_string()]);

        let loader = SiteConfigLoader::builder()
            .with_artifact(artifact)
            .with_fetcher(fetcher.clone())
            .build();
        let site = loader.load_config().await;

        assert_eq!(site.provenance(), Provenance::Compiled);
        assert_eq!(site.company().name, "Compiled Co");
        assert_eq!(site.template("service-card", 0), "<div>card</div>");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unloaded_artifact_is_ignored() {
        let fetcher = StubFetcher::new(Reply::Document(DOC));
        let loader = SiteConfigLoader::builder()
            .with_artifact(CompiledArtifact::default())
            .with_fetcher(fetcher.clone())
            .build();
        assert_eq!(loader.load_config().await.provenance(), Provenance::Parsed);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_fetch() {
        let fetcher = StubFetcher::new(Reply::Document(DOC));
        let loader = SiteConfigLoader::builder()
            .with_fetcher(fetcher.clone())
            .build();

        let (a, b) = tokio::join!(loader.load_config(), loader.load_config());
        assert!(Arc::ptr_eq(&a, &b));
        let c = loader.load_config().await;
        assert!(Arc::ptr_eq(&a, &c));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back() {
        let loader = SiteConfigLoader::builder()
            .with_fetcher(StubFetcher::new(Reply::Offline))
            .build();
        let site = loader.load_config().await;
        assert_eq!(site.provenance(), Provenance::Fallback);
        assert!(!site.services().is_empty());
        assert!(!site.company().name.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_falls_back() {
        let loader = SiteConfigLoader::builder()
            .with_fetcher(StubFetcher::new(Reply::Document("<site-config><company>")))
            .build();
        let site = loader.load_config().await;
        assert_eq!(site.provenance(), Provenance::Fallback);
        assert!(!site.services().is_empty());
    }

    #[tokio::test]
    async fn test_missing_artifact_script_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SiteConfigLoader::builder()
            .with_artifact_script(dir.path().join("compiled-config.js"))
            .with_fetcher(StubFetcher::new(Reply::Document(DOC)))
            .build();
        assert_eq!(loader.load_config().await.provenance(), Provenance::Parsed);
    }
}
