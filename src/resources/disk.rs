// Disk space token: one entry per selected filesystem, joined with ", "

use std::str::FromStr;

use crate::config::Settings;
use crate::error::Error;
use crate::models::FsSize;
use crate::provider::MetricsProvider;
use crate::units::to_largest_unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskFormat {
    /// `<fs> <used%> used`
    PercentUsed,
    /// `<fs> <100-used%> remaining`
    PercentRemaining,
    /// `<fs> <size-used> remaining`
    Remaining,
    /// `<fs> <used>/<size> used`
    UsedOutOfTotal,
}

impl FromStr for DiskFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PercentUsed" => Ok(DiskFormat::PercentUsed),
            "PercentRemaining" => Ok(DiskFormat::PercentRemaining),
            "Remaining" => Ok(DiskFormat::Remaining),
            "UsedOutOfTotal" => Ok(DiskFormat::UsedOutOfTotal),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Filesystems named in `drives`, in provider order. An empty list selects all.
pub fn select_drives<'a>(
    sizes: &'a [FsSize],
    drives: &'a [String],
) -> impl Iterator<Item = &'a FsSize> + 'a {
    sizes
        .iter()
        .filter(move |fs| drives.is_empty() || drives.iter().any(|d| *d == fs.fs))
}

pub fn format_fs(fs: &FsSize, format: DiskFormat, precision: usize) -> String {
    let used_percent = fs.use_percent.clamp(0.0, 100.0);
    match format {
        DiskFormat::PercentUsed => {
            format!("{} {:.*}% used", fs.fs, precision, used_percent)
        }
        DiskFormat::PercentRemaining => {
            format!("{} {:.*}% remaining", fs.fs, precision, 100.0 - used_percent)
        }
        DiskFormat::Remaining => format!(
            "{} {} remaining",
            fs.fs,
            to_largest_unit(fs.remaining() as f64, precision)
        ),
        DiskFormat::UsedOutOfTotal => format!(
            "{} {}/{} used",
            fs.fs,
            to_largest_unit(fs.used as f64, precision),
            to_largest_unit(fs.size as f64, precision)
        ),
    }
}

pub(super) async fn render(
    settings: &Settings,
    provider: &dyn MetricsProvider,
) -> anyhow::Result<String> {
    let sizes = provider.fs_size().await?;
    let format = settings.disk_format();
    let precision = settings.precision();
    let drives: Vec<String> = select_drives(&sizes, &settings.disk.drives)
        .map(|fs| format_fs(fs, format, precision))
        .collect();
    Ok(format!("$(database) {}", drives.join(", ")))
}
