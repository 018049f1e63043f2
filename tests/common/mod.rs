#![allow(dead_code)]

pub mod fixtures;

use sitecfg::{Compiler, CompilerOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Path to the sample document shipped with the repository.
pub fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("site-config.xml")
}

pub fn sample_document() -> String {
    std::fs::read_to_string(sample_path()).expect("sample document is readable")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A scratch directory holding a source document, with compiler options
/// pointing into it.
pub struct Workspace {
    pub dir: TempDir,
    pub options: CompilerOptions,
}

impl Workspace {
    pub fn with_source(source: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let options = CompilerOptions {
            source: dir.path().join("config").join("site-config.xml"),
            output: dir.path().join("js").join("compiled-config.js"),
            dev_mode: false,
        };
        std::fs::create_dir_all(dir.path().join("config")).expect("config dir");
        std::fs::write(&options.source, source).expect("write source");
        Self { dir, options }
    }

    pub fn compiler(&self) -> Compiler {
        Compiler::new(self.options.clone())
    }

    pub fn write_source(&self, source: &str) {
        std::fs::write(&self.options.source, source).expect("write source");
    }

    pub fn artifact_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.options.output).expect("artifact exists")
    }
}
