// Linux-specific helpers: /proc/cpuinfo frequency, /sys power_supply battery.

/// Average of the "cpu MHz" lines in /proc/cpuinfo (Linux). Used when sysinfo reports 0.
pub(super) fn read_cpu_mhz_linux() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        average_cpu_mhz(&content)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn average_cpu_mhz(cpuinfo: &str) -> Option<f64> {
    let speeds: Vec<f64> = cpuinfo
        .lines()
        .filter(|line| line.starts_with("cpu MHz"))
        .filter_map(|line| line.split_once(':'))
        .filter_map(|(_, v)| v.trim().parse::<f64>().ok())
        .filter(|mhz| *mhz > 0.0)
        .collect();
    if speeds.is_empty() {
        return None;
    }
    Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
}

/// First power supply of type "Battery" under /sys/class/power_supply (Linux).
/// Returns its raw `capacity` percentage, or None when there is no battery.
pub(super) fn read_battery_capacity_linux() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let entries = std::fs::read_dir("/sys/class/power_supply").ok()?;
        let mut dirs: Vec<_> = entries.flatten().map(|e| e.path()).collect();
        dirs.sort();
        for dir in dirs {
            let kind = std::fs::read_to_string(dir.join("type")).unwrap_or_default();
            if kind.trim() != "Battery" {
                continue;
            }
            if let Ok(present) = std::fs::read_to_string(dir.join("present"))
                && present.trim() == "0"
            {
                continue;
            }
            if let Ok(content) = std::fs::read_to_string(dir.join("capacity"))
                && let Ok(capacity) = content.trim().parse::<f64>()
            {
                return Some(capacity);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::average_cpu_mhz;

    #[test]
    fn averages_cpu_mhz_lines() {
        let cpuinfo = "processor\t: 0\ncpu MHz\t\t: 2000.000\nprocessor\t: 1\ncpu MHz\t\t: 3000.000\n";
        assert_eq!(average_cpu_mhz(cpuinfo), Some(2500.0));
    }

    #[test]
    fn no_cpu_mhz_lines_is_none() {
        assert_eq!(average_cpu_mhz("model name\t: Some CPU\n"), None);
    }
}
