// Metrics provider seam. Absent hardware is a sentinel in the reading, not an error.

use async_trait::async_trait;

use crate::models::*;

#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn current_load(&self) -> anyhow::Result<CpuLoad>;

    async fn cpu_frequency(&self) -> anyhow::Result<CpuFrequency>;

    /// `main == -1.0` when no sensor is readable.
    async fn cpu_temperature(&self) -> anyhow::Result<CpuTemperature>;

    /// `has_battery == false` on machines without one.
    async fn battery(&self) -> anyhow::Result<BatteryStatus>;

    async fn memory(&self) -> anyhow::Result<MemoryUsage>;

    /// Mounted filesystems in enumeration order.
    async fn fs_size(&self) -> anyhow::Result<Vec<FsSize>>;

    async fn network_interfaces(&self) -> anyhow::Result<Vec<NetworkInterface>>;

    async fn network_stats(&self, iface: &str) -> anyhow::Result<InterfaceStats>;
}
