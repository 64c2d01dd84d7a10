// Settings snapshot (re-read every tick) and the stores that produce it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, RwLock};

use crate::display::{Alignment, OutputFormat};
use crate::error::Error;
use crate::resources::DiskFormat;
use crate::units::{ByteUnit, FreqUnit, TempUnit};

pub const DEFAULT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_CONFIG_PATH: &str = "resmon.toml";

static HEX_COLOR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

/// One immutable configuration snapshot. Every field has a default, so an
/// empty file (or no file) yields the stock status line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "alignLeft")]
    pub align_left: bool,
    pub color: String,
    #[serde(rename = "updatefrequencyms")]
    pub update_frequency_ms: u64,
    /// Upper bound for a single resource sample before it is dropped for the tick.
    #[serde(rename = "sampletimeoutms")]
    pub sample_timeout_ms: u64,
    pub output: OutputFormat,
    /// Legacy spelling of `mem.unit`; only consulted when `mem.unit` is unset.
    pub memunit: Option<String>,
    pub show: ShowConfig,
    pub freq: FreqConfig,
    pub mem: MemConfig,
    pub temp: TempConfig,
    pub disk: DiskConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    pub cpuusage: bool,
    pub cpufreq: bool,
    pub cputemp: bool,
    pub battery: bool,
    pub mem: bool,
    pub disk: bool,
    pub network: bool,
    pub precision: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FreqConfig {
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemConfig {
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TempConfig {
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub format: String,
    /// Filesystem identifiers to include; empty means all.
    pub drives: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            align_left: false,
            color: DEFAULT_COLOR.into(),
            update_frequency_ms: 2000,
            sample_timeout_ms: 1000,
            output: OutputFormat::Plain,
            memunit: None,
            show: ShowConfig::default(),
            freq: FreqConfig::default(),
            mem: MemConfig::default(),
            temp: TempConfig::default(),
            disk: DiskConfig::default(),
        }
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            cpuusage: true,
            cpufreq: true,
            cputemp: true,
            battery: false,
            mem: true,
            disk: false,
            network: true,
            precision: 2,
        }
    }
}

impl Default for FreqConfig {
    fn default() -> Self {
        Self { unit: "GHz".into() }
    }
}

impl Default for TempConfig {
    fn default() -> Self {
        Self { unit: "C".into() }
    }
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            format: "PercentRemaining".into(),
            drives: vec![],
        }
    }
}

impl Settings {
    /// Parse and validate settings from a TOML string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.update_frequency_ms > 0,
            "updatefrequencyms must be > 0, got {}",
            self.update_frequency_ms
        );
        anyhow::ensure!(
            self.sample_timeout_ms > 0,
            "sampletimeoutms must be > 0, got {}",
            self.sample_timeout_ms
        );
        anyhow::ensure!(
            self.show.precision <= 10,
            "show.precision must be between 0 and 10, got {}",
            self.show.precision
        );
        Ok(())
    }

    pub fn alignment(&self) -> Alignment {
        if self.align_left {
            Alignment::Left
        } else {
            Alignment::Right
        }
    }

    /// The configured color if it is `#RRGGBB`.
    pub fn checked_color(&self) -> Result<&str, Error> {
        if HEX_COLOR.is_match(&self.color) {
            Ok(&self.color)
        } else {
            Err(Error::InvalidColor(self.color.clone()))
        }
    }

    pub fn color_or_default(&self) -> &str {
        self.checked_color().unwrap_or(DEFAULT_COLOR)
    }

    pub fn precision(&self) -> usize {
        self.show.precision
    }

    pub fn freq_unit(&self) -> FreqUnit {
        self.freq.unit.parse().unwrap_or_else(|e: Error| {
            tracing::warn!(error = %e, fallback = "GHz", "freq.unit");
            FreqUnit::GHz
        })
    }

    pub fn mem_unit(&self) -> ByteUnit {
        let raw = self
            .mem
            .unit
            .as_deref()
            .or(self.memunit.as_deref())
            .unwrap_or("GB");
        raw.parse().unwrap_or_else(|e: Error| {
            tracing::warn!(error = %e, fallback = "GB", "mem.unit");
            ByteUnit::GB
        })
    }

    pub fn temp_unit(&self) -> TempUnit {
        self.temp.unit.parse().unwrap_or_else(|e: Error| {
            tracing::warn!(error = %e, fallback = "C", "temp.unit");
            TempUnit::Celsius
        })
    }

    pub fn disk_format(&self) -> DiskFormat {
        self.disk.format.parse().unwrap_or_else(|e: Error| {
            tracing::warn!(error = %e, fallback = "PercentRemaining", "disk.format");
            DiskFormat::PercentRemaining
        })
    }
}

/// Source of settings snapshots; consulted once at the start of every tick.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Settings>;
}

/// TOML file on disk. A missing file means "all defaults".
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from `RESMON_CONFIG`, else `resmon.toml` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var("RESMON_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> anyhow::Result<Settings> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Settings::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(anyhow::anyhow!("read {}: {}", self.path.display(), e)),
        }
    }
}

/// In-memory store a host can push new settings into between ticks.
#[derive(Debug, Clone, Default)]
pub struct SharedConfigStore {
    inner: Arc<RwLock<Settings>>,
}

impl SharedConfigStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> anyhow::Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| anyhow::anyhow!("settings lock poisoned: {}", e))?;
        f(&mut guard);
        Ok(())
    }
}

impl ConfigStore for SharedConfigStore {
    fn load(&self) -> anyhow::Result<Settings> {
        let guard = self
            .inner
            .read()
            .map_err(|e| anyhow::anyhow!("settings lock poisoned: {}", e))?;
        guard.validate()?;
        Ok(guard.clone())
    }
}
