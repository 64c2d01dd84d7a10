// Provider readings: one struct per metrics provider call

mod network;
mod power;
mod storage;
mod system;

pub use network::{InterfaceStats, NetworkInterface};
pub use power::BatteryStatus;
pub use storage::FsSize;
pub use system::{CpuFrequency, CpuLoad, CpuTemperature, MemoryUsage, UNSUPPORTED_TEMPERATURE};
