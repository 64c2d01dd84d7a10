use anyhow::Result;
use resmon::config::{ConfigStore, FileConfigStore};
use resmon::display::WriterSink;
use resmon::sysinfo_repo::SysinfoRepo;
use resmon::worker::{Poller, WorkerDeps};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the status line, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_store = Arc::new(FileConfigStore::from_env());
    // The output format is fixed for the life of the process; everything else hot-reloads.
    let initial = config_store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, path = %config_store.path().display(), "config load failed; using defaults");
        Default::default()
    });
    tracing::info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        config = %config_store.path().display(),
        "starting"
    );

    let poller = Poller::new(WorkerDeps {
        config_store,
        provider: Arc::new(SysinfoRepo::new()),
        sink: Box::new(WriterSink::stdout(initial.output)),
    });
    let handle = resmon::worker::spawn(poller);

    shutdown_signal().await;
    tracing::info!("Received shutdown signal");
    match handle.stop().await {
        Ok(mut poller) => poller.dispose(),
        Err(e) => tracing::error!(error = %e, "worker did not stop cleanly"),
    }

    Ok(())
}
