// Metric resources: one variant per metric, each rendering an icon-prefixed token.
// Visibility is checked first; temperature and battery only probe once shown.

mod battery;
mod cpu;
mod disk;
mod memory;
mod network;

pub use disk::{DiskFormat, format_fs, select_drives};

use std::time::Duration;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use crate::config::Settings;
use crate::provider::MetricsProvider;

/// Every metric the status line knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    CpuUsage,
    CpuFreq,
    Battery,
    Memory,
    DiskSpace,
    CpuTemp,
    Network,
}

impl ResourceKind {
    /// Fixed output order of the status line.
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::CpuUsage,
        ResourceKind::CpuFreq,
        ResourceKind::Battery,
        ResourceKind::Memory,
        ResourceKind::DiskSpace,
        ResourceKind::CpuTemp,
        ResourceKind::Network,
    ];

    /// The `show.<key>` this resource is gated on.
    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::CpuUsage => "cpuusage",
            ResourceKind::CpuFreq => "cpufreq",
            ResourceKind::Battery => "battery",
            ResourceKind::Memory => "mem",
            ResourceKind::DiskSpace => "disk",
            ResourceKind::CpuTemp => "cputemp",
            ResourceKind::Network => "network",
        }
    }

    /// Configuration half of visibility. Hardware presence is decided by `render`.
    pub fn is_shown(self, settings: &Settings) -> bool {
        let show = &settings.show;
        match self {
            ResourceKind::CpuUsage => show.cpuusage,
            ResourceKind::CpuFreq => show.cpufreq,
            ResourceKind::Battery => show.battery,
            ResourceKind::Memory => show.mem,
            ResourceKind::DiskSpace => show.disk,
            ResourceKind::CpuTemp => show.cputemp,
            ResourceKind::Network => show.network,
        }
    }

    /// One provider read, formatted. `Ok(None)` when the hardware is absent
    /// (no battery, no temperature sensor).
    pub async fn render(
        self,
        settings: &Settings,
        provider: &dyn MetricsProvider,
    ) -> anyhow::Result<Option<String>> {
        match self {
            ResourceKind::CpuUsage => cpu::render_usage(settings, provider).await.map(Some),
            ResourceKind::CpuFreq => cpu::render_frequency(settings, provider).await.map(Some),
            ResourceKind::CpuTemp => cpu::render_temperature(settings, provider).await,
            ResourceKind::Battery => battery::render(provider).await,
            ResourceKind::Memory => memory::render(settings, provider).await.map(Some),
            ResourceKind::DiskSpace => disk::render(settings, provider).await.map(Some),
            ResourceKind::Network => Ok(Some(network::render(provider).await)),
        }
    }
}

/// A resource plus the widest token it has produced so far.
#[derive(Debug, Clone)]
pub struct MetricResource {
    kind: ResourceKind,
    max_width: usize,
}

impl MetricResource {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, max_width: 0 }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// The padded token, or `None` when hidden, failed, or slower than `timeout`.
    pub async fn display(
        &mut self,
        settings: &Settings,
        provider: &dyn MetricsProvider,
        timeout: Duration,
    ) -> Option<String> {
        if !self.kind.is_shown(settings) {
            return None;
        }
        match tokio::time::timeout(timeout, self.kind.render(settings, provider)).await {
            Ok(Ok(Some(text))) => Some(self.pad(text)),
            Ok(Ok(None)) => {
                debug!(resource = self.kind.key(), "hardware not present");
                None
            }
            Ok(Err(e)) => {
                warn!(resource = self.kind.key(), error = %e, "sample failed");
                None
            }
            Err(_) => {
                warn!(
                    resource = self.kind.key(),
                    timeout_ms = timeout.as_millis() as u64,
                    "sample timed out"
                );
                None
            }
        }
    }

    /// Right-pads `text` to the widest width seen so far, growing it if needed.
    pub fn pad(&mut self, text: String) -> String {
        let width = text.width();
        self.max_width = self.max_width.max(width);
        let mut padded = text;
        padded.extend(std::iter::repeat_n(' ', self.max_width - width));
        padded
    }
}
