//! Recompiles the artifact whenever the source document changes.

use log::{error, info, warn};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use sitecfg_compiler::Compiler;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

const DEBOUNCE_WINDOW: Duration = Duration::from_millis(120);

/// Watches the compiler's source document until Ctrl-C. Failed
/// recompiles are logged and leave the previous artifact in place.
pub async fn watch(compiler: &Compiler) -> anyhow::Result<()> {
    let source = compiler.options().source.clone();
    let dir = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    let file_name = source.file_name().map(OsStr::to_os_string);

    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if touches(&event, file_name.as_deref()) {
                let _ = tx.send(());
            }
        }
        Err(e) => warn!("Watch error: {e}"),
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("Watching {} for changes. Press Ctrl+C to stop.", source.display());

    loop {
        tokio::select! {
            event = rx.recv() => {
                if event.is_none() {
                    break;
                }
                debounce(&mut rx).await;
                info!("Detected changes in {}", source.display());
                if let Err(e) = compiler.compile() {
                    error!("Compilation failed: {e}");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watcher");
                break;
            }
        }
    }
    Ok(())
}

/// Whether `event` writes or creates the watched file.
fn touches(event: &Event, file_name: Option<&OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| file_name.is_none_or(|name| p.file_name() == Some(name)))
}

/// Swallows the burst of events a single save produces.
async fn debounce(rx: &mut mpsc::UnboundedReceiver<()>) {
    let sleep = tokio::time::sleep(DEBOUNCE_WINDOW);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => break,
            more = rx.recv() => {
                if more.is_none() {
                    break;
                }
                sleep.as_mut().reset(Instant::now() + DEBOUNCE_WINDOW);
            }
        }
    }
}
