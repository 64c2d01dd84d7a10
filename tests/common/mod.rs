// Shared test helpers: a scripted metrics provider and a recording display sink

#![allow(dead_code)]

use async_trait::async_trait;
use resmon::display::{Alignment, DisplaySink};
use resmon::models::*;
use resmon::provider::MetricsProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Provider returning fixed readings. Individual operations can be made to
/// fail, hang forever, or sleep before answering.
#[derive(Clone)]
pub struct StubProvider {
    pub idle_percent: f64,
    pub avg_ghz: f64,
    pub temperature: f64,
    pub battery: BatteryStatus,
    pub memory: MemoryUsage,
    pub filesystems: Vec<FsSize>,
    pub interfaces: Vec<String>,
    pub fail: Vec<&'static str>,
    pub hang: Vec<&'static str>,
    pub delays: HashMap<&'static str, Duration>,
    pub calls: Arc<Mutex<Vec<&'static str>>>,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self {
            idle_percent: 70.0,
            avg_ghz: 2.5,
            temperature: UNSUPPORTED_TEMPERATURE,
            battery: BatteryStatus::absent(),
            memory: MemoryUsage {
                active: 4 * GIB,
                total: 16 * GIB,
            },
            filesystems: vec![
                FsSize::new("/dev/sda1", "/", 100 * GIB, 25 * GIB),
                FsSize::new("/dev/sdb1", "/data", 512 * GIB, 384 * GIB),
            ],
            interfaces: vec!["eth0".into(), "lo".into()],
            fail: vec![],
            hang: vec![],
            delays: HashMap::new(),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl StubProvider {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    async fn gate(&self, operation: &'static str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(operation);
        if let Some(delay) = self.delays.get(operation) {
            tokio::time::sleep(*delay).await;
        }
        if self.hang.contains(&operation) {
            std::future::pending::<()>().await;
        }
        if self.fail.contains(&operation) {
            anyhow::bail!("{operation} exploded");
        }
        Ok(())
    }
}

#[async_trait]
impl MetricsProvider for StubProvider {
    async fn current_load(&self) -> anyhow::Result<CpuLoad> {
        self.gate("current_load").await?;
        Ok(CpuLoad {
            idle_percent: self.idle_percent,
        })
    }

    async fn cpu_frequency(&self) -> anyhow::Result<CpuFrequency> {
        self.gate("cpu_frequency").await?;
        Ok(CpuFrequency {
            avg_ghz: self.avg_ghz,
        })
    }

    async fn cpu_temperature(&self) -> anyhow::Result<CpuTemperature> {
        self.gate("cpu_temperature").await?;
        Ok(CpuTemperature {
            main: self.temperature,
        })
    }

    async fn battery(&self) -> anyhow::Result<BatteryStatus> {
        self.gate("battery").await?;
        Ok(self.battery)
    }

    async fn memory(&self) -> anyhow::Result<MemoryUsage> {
        self.gate("memory").await?;
        Ok(self.memory)
    }

    async fn fs_size(&self) -> anyhow::Result<Vec<FsSize>> {
        self.gate("fs_size").await?;
        Ok(self.filesystems.clone())
    }

    async fn network_interfaces(&self) -> anyhow::Result<Vec<NetworkInterface>> {
        self.gate("network_interfaces").await?;
        Ok(self
            .interfaces
            .iter()
            .map(|iface| NetworkInterface {
                iface: iface.clone(),
                mac_address: String::new(),
                ipv4: vec![],
                ipv6: vec![],
            })
            .collect())
    }

    async fn network_stats(&self, iface: &str) -> anyhow::Result<InterfaceStats> {
        self.gate("network_stats").await?;
        Ok(InterfaceStats {
            iface: iface.to_string(),
            rx_bytes: 1000,
            tx_bytes: 500,
            rx_sec: 0.0,
            tx_sec: 0.0,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Create(Alignment),
    Color(String),
    Text(String),
    Show,
    Dispose,
}

/// Sink that records every call; clones share the same event log.
/// With `fail` set, every call is still recorded but returns an error.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<SinkEvent>>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn push(&self, event: SinkEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event);
        if self.fail {
            anyhow::bail!("display went away");
        }
        Ok(())
    }
}

impl DisplaySink for RecordingSink {
    fn create_element(&mut self, alignment: Alignment) -> anyhow::Result<()> {
        self.push(SinkEvent::Create(alignment))
    }

    fn set_color(&mut self, color: &str) -> anyhow::Result<()> {
        self.push(SinkEvent::Color(color.to_string()))
    }

    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.push(SinkEvent::Text(text.to_string()))
    }

    fn show(&mut self) -> anyhow::Result<()> {
        self.push(SinkEvent::Show)
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.push(SinkEvent::Dispose)
    }
}
