// Metrics provider backed by sysinfo

mod linux;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

use crate::models::*;
use crate::provider::MetricsProvider;

/// Component labels that identify the CPU package sensor, in priority order.
const CPU_SENSOR_LABELS: [&str; 6] = ["package id 0", "tctl", "tdie", "coretemp", "k10temp", "cpu"];

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    components: Arc<std::sync::Mutex<Components>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    last_network: Arc<std::sync::Mutex<HashMap<String, (u64, u64, Instant)>>>,
    last_cpu_refresh: Arc<std::sync::Mutex<Option<(Instant, f64)>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            components: Arc::new(std::sync::Mutex::new(
                Components::new_with_refreshed_list(),
            )),
            disks: Arc::new(std::sync::Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(std::sync::Mutex::new(Networks::new_with_refreshed_list())),
            last_network: Arc::new(std::sync::Mutex::new(HashMap::new())),
            last_cpu_refresh: Arc::new(std::sync::Mutex::new(None)),
        }
    }
}

/// Picks the CPU package reading out of `(label, celsius)` pairs.
fn pick_cpu_temperature<'a>(readings: impl IntoIterator<Item = (&'a str, Option<f32>)>) -> Option<f64> {
    let readings: Vec<(String, f32)> = readings
        .into_iter()
        .filter_map(|(label, t)| t.map(|t| (label.to_lowercase(), t)))
        .filter(|(_, t)| t.is_finite() && *t > 0.0)
        .collect();
    CPU_SENSOR_LABELS.iter().find_map(|wanted| {
        readings
            .iter()
            .find(|(label, _)| label.contains(wanted))
            .map(|(_, t)| *t as f64)
    })
}

#[async_trait]
impl MetricsProvider for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "current_load"))]
    async fn current_load(&self) -> anyhow::Result<CpuLoad> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let mut guard = last_cpu_refresh
                .lock()
                .map_err(|e| anyhow::anyhow!("cpu refresh lock poisoned: {}", e))?;

            let now = Instant::now();
            let cached = *guard;
            let usage = match cached {
                // Too soon for a fresh delta; reuse the cached usage without blocking.
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    prev_usage
                }
                _ => {
                    sys.refresh_cpu_usage();
                    let usage = sys.global_cpu_usage() as f64;
                    *guard = Some((now, usage));
                    usage
                }
            };

            Ok(CpuLoad {
                idle_percent: 100.0 - usage.clamp(0.0, 100.0),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_frequency"))]
    async fn cpu_frequency(&self) -> anyhow::Result<CpuFrequency> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_cpu_frequency();

            let cpus = sys.cpus();
            let sysinfo_mhz = if cpus.is_empty() {
                0.0
            } else {
                cpus.iter().map(|c| c.frequency() as f64).sum::<f64>() / cpus.len() as f64
            };
            let mhz = if sysinfo_mhz > 0.0 {
                sysinfo_mhz
            } else {
                linux::read_cpu_mhz_linux().unwrap_or(0.0)
            };

            Ok(CpuFrequency {
                avg_ghz: mhz / 1000.0,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_temperature"))]
    async fn cpu_temperature(&self) -> anyhow::Result<CpuTemperature> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let mut components = components
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo components lock poisoned: {}", e))?;
            components.refresh(false);
            let main = pick_cpu_temperature(
                components
                    .list()
                    .iter()
                    .map(|c| (c.label(), c.temperature())),
            );
            Ok(main
                .map(|main| CpuTemperature { main })
                .unwrap_or_else(CpuTemperature::unsupported))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "battery"))]
    async fn battery(&self) -> anyhow::Result<BatteryStatus> {
        tokio::task::spawn_blocking(|| {
            Ok(match linux::read_battery_capacity_linux() {
                Some(percent) => BatteryStatus {
                    has_battery: true,
                    percent,
                },
                None => BatteryStatus::absent(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    async fn memory(&self) -> anyhow::Result<MemoryUsage> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let available = sys.available_memory();
            Ok(MemoryUsage {
                active: total.saturating_sub(available),
                total,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "fs_size"))]
    async fn fs_size(&self) -> anyhow::Result<Vec<FsSize>> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(false);
            Ok(disks_guard
                .list()
                .iter()
                .map(|d| {
                    let total = d.total_space();
                    let used = total.saturating_sub(d.available_space());
                    let mount = d.mount_point().to_string_lossy().into_owned();
                    let name = d.name().to_string_lossy().into_owned();
                    let fs = if name.is_empty() { mount.clone() } else { name };
                    FsSize {
                        type_: d.file_system().to_string_lossy().into_owned(),
                        ..FsSize::new(fs, mount, total, used)
                    }
                })
                .collect())
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "network_interfaces"))]
    async fn network_interfaces(&self) -> anyhow::Result<Vec<NetworkInterface>> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks_guard.refresh(true);
            let mut interfaces: Vec<NetworkInterface> = networks_guard
                .list()
                .iter()
                .map(|(name, data)| NetworkInterface {
                    iface: name.clone(),
                    mac_address: data.mac_address().to_string(),
                    ipv4: data
                        .ip_networks()
                        .iter()
                        .filter(|n| n.addr.is_ipv4())
                        .map(|n| n.addr.to_string())
                        .collect(),
                    ipv6: data
                        .ip_networks()
                        .iter()
                        .filter(|n| n.addr.is_ipv6())
                        .map(|n| n.addr.to_string())
                        .collect(),
                })
                .collect();
            interfaces.sort_by(|a, b| a.iface.cmp(&b.iface));
            Ok(interfaces)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "network_stats"))]
    async fn network_stats(&self, iface: &str) -> anyhow::Result<InterfaceStats> {
        let networks = self.networks.clone();
        let last_network = self.last_network.clone();
        let iface = iface.to_string();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks_guard.refresh(true);
            let data = networks_guard
                .list()
                .get(&iface)
                .ok_or_else(|| anyhow::anyhow!("unknown interface: {}", iface))?;
            let rx_bytes = data.total_received();
            let tx_bytes = data.total_transmitted();

            let now = Instant::now();
            let mut rates = (0.0, 0.0);
            let mut last = last_network
                .lock()
                .map_err(|e| anyhow::anyhow!("network history lock poisoned: {}", e))?;
            if let Some((prev_rx, prev_tx, prev_ts)) = last.get(&iface) {
                let dt_secs = now.duration_since(*prev_ts).as_secs_f64();
                if dt_secs > 0.0 {
                    rates = (
                        rx_bytes.saturating_sub(*prev_rx) as f64 / dt_secs,
                        tx_bytes.saturating_sub(*prev_tx) as f64 / dt_secs,
                    );
                }
            }
            last.insert(iface.clone(), (rx_bytes, tx_bytes, now));

            Ok(InterfaceStats {
                iface,
                rx_bytes,
                tx_bytes,
                rx_sec: rates.0,
                tx_sec: rates.1,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}
