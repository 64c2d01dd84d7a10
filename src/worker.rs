// Polling loop: snapshot settings, restyle the sink if needed, sample, publish, sleep.
// Ticks never overlap; stop is honored between ticks.

use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::Duration;
use tracing::{Instrument, debug, warn};

use crate::aggregator::{self, ResourceRegistry};
use crate::config::{ConfigStore, Settings};
use crate::display::{Alignment, DisplaySink};
use crate::provider::MetricsProvider;

/// Collaborators the loop drives.
pub struct WorkerDeps {
    pub config_store: Arc<dyn ConfigStore>,
    pub provider: Arc<dyn MetricsProvider>,
    pub sink: Box<dyn DisplaySink>,
}

/// What one tick published and how long to wait before the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub line: String,
    pub next_delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
struct SinkStyle {
    alignment: Alignment,
    color: String,
}

pub struct Poller {
    config_store: Arc<dyn ConfigStore>,
    provider: Arc<dyn MetricsProvider>,
    sink: Box<dyn DisplaySink>,
    registry: ResourceRegistry,
    settings: Option<Arc<Settings>>,
    style: Option<SinkStyle>,
}

fn log_sink_error(operation: &'static str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, operation, "display sink call failed");
    }
}

impl Poller {
    pub fn new(deps: WorkerDeps) -> Self {
        Self::with_registry(deps, ResourceRegistry::new())
    }

    pub fn with_registry(deps: WorkerDeps, registry: ResourceRegistry) -> Self {
        let WorkerDeps {
            config_store,
            provider,
            sink,
        } = deps;
        Self {
            config_store,
            provider,
            sink,
            registry,
            settings: None,
            style: None,
        }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Settings used by the most recent tick.
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_deref()
    }

    /// Fetches this tick's snapshot; a failed load keeps the previous one.
    async fn refresh_settings(&mut self) -> Arc<Settings> {
        let store = self.config_store.clone();
        let loaded = tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| anyhow::anyhow!("config load task join: {}", e))
            .and_then(|r| r);
        match loaded {
            Ok(settings) => {
                let settings = Arc::new(settings);
                self.settings = Some(settings.clone());
                settings
            }
            Err(e) => {
                warn!(error = %e, "config load failed; keeping previous settings");
                self.settings
                    .get_or_insert_with(|| Arc::new(Settings::default()))
                    .clone()
            }
        }
    }

    fn apply_style(&mut self, settings: &Settings) {
        let wanted = SinkStyle {
            alignment: settings.alignment(),
            color: settings.color_or_default().to_string(),
        };
        if self.style.as_ref() == Some(&wanted) {
            return;
        }
        if let Err(e) = settings.checked_color() {
            warn!(error = %e, fallback = %wanted.color, "color");
        }

        let realign = self
            .style
            .as_ref()
            .is_none_or(|s| s.alignment != wanted.alignment);
        if realign {
            if self.style.is_some() {
                log_sink_error("dispose", self.sink.dispose());
            }
            log_sink_error("create_element", self.sink.create_element(wanted.alignment));
            log_sink_error("set_color", self.sink.set_color(&wanted.color));
            log_sink_error("show", self.sink.show());
        } else {
            log_sink_error("set_color", self.sink.set_color(&wanted.color));
        }
        debug!(alignment = ?wanted.alignment, color = %wanted.color, "sink restyled");
        self.style = Some(wanted);
    }

    /// Runs exactly one tick and publishes its line.
    pub async fn tick(&mut self) -> TickOutcome {
        let settings = self.refresh_settings().await;
        self.apply_style(&settings);

        let line =
            aggregator::aggregate(&mut self.registry, &settings, self.provider.as_ref()).await;
        log_sink_error("set_text", self.sink.set_text(&line));

        TickOutcome {
            line,
            next_delay: Duration::from_millis(settings.update_frequency_ms),
        }
    }

    /// Hides and releases the display element.
    pub fn dispose(&mut self) {
        log_sink_error("dispose", self.sink.dispose());
        self.style = None;
    }
}

/// Handle to a running loop. Dropping it also stops the loop after the current tick.
pub struct PollerHandle {
    shutdown_tx: oneshot::Sender<()>,
    join: tokio::task::JoinHandle<Poller>,
}

impl PollerHandle {
    /// Lets the in-flight tick publish, then halts before the next one.
    pub async fn stop(self) -> anyhow::Result<Poller> {
        let _ = self.shutdown_tx.send(());
        self.join
            .await
            .map_err(|e| anyhow::anyhow!("poller task join: {}", e))
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Starts cycling: tick, then sleep for that tick's `updatefrequencyms`.
pub fn spawn(mut poller: Poller) -> PollerHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let span = tracing::span!(tracing::Level::DEBUG, "worker");
    let join = tokio::spawn(
        async move {
            loop {
                let outcome = poller.tick().await;
                tokio::select! {
                    _ = tokio::time::sleep(outcome.next_delay) => {}
                    _ = &mut shutdown_rx => {
                        debug!("Worker shutting down");
                        break;
                    }
                }
            }
            poller
        }
        .instrument(span),
    );
    PollerHandle { shutdown_tx, join }
}
