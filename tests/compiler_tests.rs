mod common;

use common::fixtures::{MALFORMED, SMALL_SITE};
use common::{TestResult, Workspace, init_logging, sample_document, sample_path};
use sitecfg::{CompileError, CompiledArtifact, compile_document, generate_script};
use std::fs;

#[test]
fn test_compiling_twice_is_byte_identical() -> TestResult {
    init_logging();
    let workspace = Workspace::with_source(&sample_document());
    let compiler = workspace.compiler();

    compiler.compile()?;
    let first = workspace.artifact_bytes();
    compiler.compile()?;
    assert_eq!(workspace.artifact_bytes(), first);
    Ok(())
}

#[test]
fn test_broken_edit_keeps_previous_artifact() -> TestResult {
    let workspace = Workspace::with_source(SMALL_SITE);
    let compiler = workspace.compiler();
    compiler.compile()?;
    let good = workspace.artifact_bytes();

    workspace.write_source(MALFORMED);
    assert!(matches!(compiler.compile(), Err(CompileError::Document(_))));
    assert_eq!(workspace.artifact_bytes(), good);

    let leftovers: Vec<_> = fs::read_dir(workspace.dir.path().join("js"))?
        .filter_map(Result::ok)
        .map(|e| e.file_name())
        .collect();
    assert_eq!(leftovers, ["compiled-config.js"]);
    Ok(())
}

#[test]
fn test_artifact_contents() -> TestResult {
    let workspace = Workspace::with_source(SMALL_SITE);
    let report = workspace.compiler().compile()?;
    let script = String::from_utf8(workspace.artifact_bytes())?;
    let artifact = CompiledArtifact::from_script(&script)?;

    assert!(artifact.loaded);
    assert!(script.contains("window") && script.contains("compiledConfig"));
    assert_eq!(artifact.config.services.len(), 2);
    assert_eq!(artifact.templates["service-card"].len(), 2);
    assert_eq!(artifact.template("testimonial", 0).matches('★').count(), 5);
    assert_eq!(artifact.css_vars.get("--color-accent-color"), Some("#f5a623"));
    assert_eq!(artifact.css_vars.get("--font-heading"), Some("Montserrat"));
    assert_eq!(artifact.feature_map.get("chatbot"), Some(&false));
    assert_eq!(artifact.feature_map.get("gallery-page.instagram-feed"), Some(&false));
    assert_eq!(report.toggles, artifact.feature_map.len());
    assert_eq!(report.templates, 3);
    Ok(())
}

#[test]
fn test_sample_compiles_every_card_kind() -> TestResult {
    let artifact = compile_document(&sample_document(), &sample_path().to_string_lossy())?;
    for name in ["service-card", "testimonial", "accreditation", "gallery-project"] {
        assert!(!artifact.templates[name].is_empty(), "no {name} cards");
    }
    assert!(artifact.template("testimonial", 1).contains("David &amp; Helen Moore"));
    Ok(())
}

#[test]
fn test_digest_tracks_source_content() -> TestResult {
    let a = compile_document(SMALL_SITE, "site-config.xml")?;
    let b = compile_document(&SMALL_SITE.replace("Acme", "Apex"), "site-config.xml")?;
    assert_ne!(a.source_digest, b.source_digest);
    assert_eq!(a.source_digest, compile_document(SMALL_SITE, "site-config.xml")?.source_digest);
    Ok(())
}

#[test]
fn test_dev_script_reads_back() -> TestResult {
    let artifact = compile_document(SMALL_SITE, "site-config.xml")?;
    let script = generate_script(&artifact, true)?;
    assert_eq!(CompiledArtifact::from_script(&script)?, artifact);
    Ok(())
}
