// CPU and memory readings

/// Sentinel reported when no CPU temperature sensor is readable.
pub const UNSUPPORTED_TEMPERATURE: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuLoad {
    /// Idle share of all CPUs since the previous refresh, 0..=100.
    pub idle_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuFrequency {
    /// Average current speed across cores, in GHz.
    pub avg_ghz: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuTemperature {
    /// Main package temperature in Celsius, or [`UNSUPPORTED_TEMPERATURE`].
    pub main: f64,
}

impl CpuTemperature {
    pub fn unsupported() -> Self {
        Self {
            main: UNSUPPORTED_TEMPERATURE,
        }
    }

    /// The reading, unless the provider reported the sentinel.
    pub fn celsius(&self) -> Option<f64> {
        if self.main == UNSUPPORTED_TEMPERATURE || self.main.is_nan() {
            None
        } else {
            Some(self.main)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    /// Bytes in active use (total minus reclaimable).
    pub active: u64,
    pub total: u64,
}
