// Mounted filesystem sizes

#[derive(Debug, Clone, PartialEq)]
pub struct FsSize {
    /// Filesystem identifier (device name, or mount point when the device is unnamed).
    pub fs: String,
    pub mount: String,
    pub type_: String,
    pub size: u64,
    pub used: u64,
    /// `used / size * 100`, 0 for empty filesystems.
    pub use_percent: f64,
}

impl FsSize {
    pub fn new(fs: impl Into<String>, mount: impl Into<String>, size: u64, used: u64) -> Self {
        let use_percent = if size > 0 {
            (used as f64 / size as f64) * 100.0
        } else {
            0.0
        };
        Self {
            fs: fs.into(),
            mount: mount.into(),
            type_: String::new(),
            size,
            used,
            use_percent,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.used)
    }
}
