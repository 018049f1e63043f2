use crate::cards::CardRenderer;
use crate::error::CompileError;
use crate::script::generate_script;
use log::info;
use sha2::{Digest, Sha256};
use sitecfg_types::{CompiledArtifact, StyleTable};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

pub const DEFAULT_SOURCE: &str = "config/site-config.xml";
pub const DEFAULT_OUTPUT: &str = "js/compiled-config.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Pretty-printed payload and a console notice in the generated script.
    pub dev_mode: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            dev_mode: false,
        }
    }
}

/// Summary of one successful compile.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileReport {
    pub elapsed: Duration,
    pub bytes: usize,
    pub toggles: usize,
    pub templates: usize,
}

/// Parses a source document and assembles everything the runtime needs.
///
/// `source_name` is recorded in the artifact as given.
pub fn compile_document(raw: &str, source_name: &str) -> Result<CompiledArtifact, CompileError> {
    let config = sitecfg_document::parse(raw)?;
    let templates = CardRenderer::new()?.render_all(&config)?;
    let css_vars = StyleTable::from_design(&config.design);
    let feature_map = sitecfg_toggles::flatten(&config.feature_toggles);

    Ok(CompiledArtifact {
        loaded: true,
        source: source_name.to_string(),
        source_digest: hex::encode(Sha256::digest(raw.as_bytes())),
        config,
        templates,
        css_vars,
        feature_map,
    })
}

pub struct Compiler {
    options: CompilerOptions,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compiles the source document and replaces the output file.
    ///
    /// The output is written all-or-nothing: on any error the previous
    /// artifact is left untouched.
    pub fn compile(&self) -> Result<CompileReport, CompileError> {
        let CompilerOptions {
            source,
            output,
            dev_mode,
        } = &self.options;
        info!("Compiling {} -> {}", source.display(), output.display());
        let start = Instant::now();

        if !source.is_file() {
            return Err(CompileError::SourceNotFound(source.clone()));
        }
        let raw = fs::read_to_string(source)?;
        let artifact = compile_document(&raw, &source.to_string_lossy())?;
        let script = generate_script(&artifact, *dev_mode)?;
        write_atomic(output, &script)?;

        let report = CompileReport {
            elapsed: start.elapsed(),
            bytes: script.len(),
            toggles: artifact.feature_map.len(),
            templates: artifact.template_count(),
        };
        info!(
            "Compilation successful: {:.1}ms, {:.1}KB, {} toggles, {} templates",
            report.elapsed.as_secs_f64() * 1000.0,
            report.bytes as f64 / 1024.0,
            report.toggles,
            report.templates
        );
        Ok(report)
    }
}

/// Writes to a sibling temporary file and renames it over `path`.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SOURCE: &str = r#"<site-config>
        <company><name>Acme Builders</name></company>
        <branding><colors><primary>#1a3a5c</primary></colors></branding>
        <services><service id="kitchens"><name>Kitchens</name></service></services>
        <feature-toggles><chatbot enabled="false"/></feature-toggles>
    </site-config>"#;

    fn options(dir: &Path) -> CompilerOptions {
        CompilerOptions {
            source: dir.join("site-config.xml"),
            output: dir.join("js").join("compiled-config.js"),
            dev_mode: false,
        }
    }

    #[test]
    fn test_compile_document_fills_tables() {
        let artifact = compile_document(SOURCE, "site-config.xml").unwrap();
        assert!(artifact.loaded);
        assert_eq!(artifact.source_digest.len(), 64);
        assert_eq!(artifact.css_vars.get("--color-primary"), Some("#1a3a5c"));
        assert_eq!(artifact.feature_map.get("chatbot"), Some(&false));
        assert_eq!(artifact.template_count(), 1);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let dir = tempdir().unwrap();
        let options = options(dir.path());
        fs::write(&options.source, SOURCE).unwrap();
        let compiler = Compiler::new(options.clone());

        compiler.compile().unwrap();
        let first = fs::read(&options.output).unwrap();
        let report = compiler.compile().unwrap();
        let second = fs::read(&options.output).unwrap();

        assert_eq!(first, second);
        assert_eq!(report.bytes, second.len());
        assert_eq!(report.toggles, 1);
    }

    #[test]
    fn test_failed_compile_keeps_previous_artifact() {
        let dir = tempdir().unwrap();
        let options = options(dir.path());
        fs::write(&options.source, SOURCE).unwrap();
        let compiler = Compiler::new(options.clone());
        compiler.compile().unwrap();
        let good = fs::read(&options.output).unwrap();

        fs::write(&options.source, "<site-config><company></site-config>").unwrap();
        let err = compiler.compile().unwrap_err();
        assert!(matches!(err, CompileError::Document(_)));
        assert_eq!(fs::read(&options.output).unwrap(), good);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempdir().unwrap();
        let err = Compiler::new(options(dir.path())).compile().unwrap_err();
        assert!(matches!(err, CompileError::SourceNotFound(_)));
        assert!(!dir.path().join("js").exists());
    }
}
