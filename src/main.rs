use anyhow::Context;
use clap::Parser;
use sitecfg::{Compiler, CompilerOptions};
use std::path::PathBuf;

/// Compile the XML site configuration into the runtime artifact script.
#[derive(Parser, Debug)]
#[command(name = "sitecfg", version, about)]
struct Cli {
    /// Source XML file path
    #[arg(long, default_value = sitecfg_compiler::DEFAULT_SOURCE)]
    source: PathBuf,

    /// Output script path
    #[arg(long, default_value = sitecfg_compiler::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Development mode: readable output and debug logging
    #[arg(long)]
    dev: bool,

    /// Watch the source for changes and rebuild
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.dev { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let compiler = Compiler::new(CompilerOptions {
        source: cli.source,
        output: cli.output,
        dev_mode: cli.dev,
    });

    compiler
        .compile()
        .with_context(|| format!("Failed to compile {}", compiler.options().source.display()))?;

    if cli.watch {
        sitecfg::watch::watch(&compiler).await?;
    }
    Ok(())
}
