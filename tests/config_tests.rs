// Settings loading, defaults, validation and fallback tests

use resmon::config::{ConfigStore, FileConfigStore, Settings, SharedConfigStore};
use resmon::display::{Alignment, OutputFormat};
use resmon::resources::DiskFormat;
use resmon::units::{ByteUnit, FreqUnit, TempUnit};

const FULL_CONFIG: &str = r##"
alignLeft = true
color = "#00ff7f"
updatefrequencyms = 1500
sampletimeoutms = 400
output = "json"

[show]
cpuusage = true
cpufreq = false
cputemp = true
battery = true
mem = true
disk = true
network = false
precision = 1

[freq]
unit = "MHz"

[mem]
unit = "MB"

[temp]
unit = "F"

[disk]
format = "UsedOutOfTotal"
drives = ["/dev/sda1", "C:"]
"##;

#[test]
fn test_config_loads_from_str() {
    let settings = Settings::load_from_str(FULL_CONFIG).expect("load_from_str");
    assert_eq!(settings.alignment(), Alignment::Left);
    assert_eq!(settings.color_or_default(), "#00ff7f");
    assert_eq!(settings.update_frequency_ms, 1500);
    assert_eq!(settings.sample_timeout_ms, 400);
    assert_eq!(settings.output, OutputFormat::Json);
    assert!(!settings.show.cpufreq);
    assert!(settings.show.battery);
    assert!(!settings.show.network);
    assert_eq!(settings.precision(), 1);
    assert_eq!(settings.freq_unit(), FreqUnit::MHz);
    assert_eq!(settings.mem_unit(), ByteUnit::MB);
    assert_eq!(settings.temp_unit(), TempUnit::Fahrenheit);
    assert_eq!(settings.disk_format(), DiskFormat::UsedOutOfTotal);
    assert_eq!(settings.disk.drives, vec!["/dev/sda1", "C:"]);
}

#[test]
fn test_empty_config_uses_defaults() {
    let settings = Settings::load_from_str("").expect("empty config");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.alignment(), Alignment::Right);
    assert_eq!(settings.color_or_default(), "#FFFFFF");
    assert_eq!(settings.update_frequency_ms, 2000);
    assert_eq!(settings.precision(), 2);
    assert!(settings.show.cpuusage);
    assert!(settings.show.cpufreq);
    assert!(settings.show.cputemp);
    assert!(settings.show.mem);
    assert!(settings.show.network);
    assert!(!settings.show.battery);
    assert!(!settings.show.disk);
    assert_eq!(settings.freq_unit(), FreqUnit::GHz);
    assert_eq!(settings.mem_unit(), ByteUnit::GB);
    assert_eq!(settings.temp_unit(), TempUnit::Celsius);
    assert_eq!(settings.disk_format(), DiskFormat::PercentRemaining);
    assert!(settings.disk.drives.is_empty());
}

#[test]
fn test_partial_table_keeps_other_defaults() {
    let settings = Settings::load_from_str("[show]\ndisk = true\n").unwrap();
    assert!(settings.show.disk);
    assert!(settings.show.cpuusage);
    assert_eq!(settings.precision(), 2);
}

#[test]
fn test_validation_rejects_zero_update_frequency() {
    let err = Settings::load_from_str("updatefrequencyms = 0").unwrap_err();
    assert!(err.to_string().contains("updatefrequencyms"));
}

#[test]
fn test_validation_rejects_zero_sample_timeout() {
    let err = Settings::load_from_str("sampletimeoutms = 0").unwrap_err();
    assert!(err.to_string().contains("sampletimeoutms"));
}

#[test]
fn test_validation_rejects_huge_precision() {
    let err = Settings::load_from_str("[show]\nprecision = 40").unwrap_err();
    assert!(err.to_string().contains("show.precision"));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let err = Settings::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_malformed_color_falls_back_to_white() {
    for bad in ["red", "#FFF", "#GGGGGG", "FFFFFF", "#1234567"] {
        let settings = Settings {
            color: bad.into(),
            ..Settings::default()
        };
        assert!(settings.checked_color().is_err(), "{bad}");
        assert_eq!(settings.color_or_default(), "#FFFFFF");
    }
}

#[test]
fn test_unknown_units_fall_back_to_defaults() {
    let settings = Settings::load_from_str(
        r#"
[freq]
unit = "THz"
[mem]
unit = "TB"
[temp]
unit = "K"
[disk]
format = "Sideways"
"#,
    )
    .unwrap();
    assert_eq!(settings.freq_unit(), FreqUnit::GHz);
    assert_eq!(settings.mem_unit(), ByteUnit::GB);
    assert_eq!(settings.temp_unit(), TempUnit::Celsius);
    assert_eq!(settings.disk_format(), DiskFormat::PercentRemaining);
}

#[test]
fn test_legacy_memunit_is_used_when_mem_unit_unset() {
    let settings = Settings::load_from_str("memunit = \"KB\"").unwrap();
    assert_eq!(settings.mem_unit(), ByteUnit::KB);

    let settings = Settings::load_from_str("memunit = \"KB\"\n[mem]\nunit = \"MB\"").unwrap();
    assert_eq!(settings.mem_unit(), ByteUnit::MB);
}

#[test]
fn test_file_store_missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = FileConfigStore::new(dir.path().join("absent.toml"));
    assert_eq!(store.load().unwrap(), Settings::default());
}

#[test]
fn test_file_store_rereads_on_every_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("resmon.toml");
    std::fs::write(&path, "updatefrequencyms = 1000").unwrap();
    let store = FileConfigStore::new(&path);
    assert_eq!(store.load().unwrap().update_frequency_ms, 1000);

    std::fs::write(&path, "updatefrequencyms = 3000").unwrap();
    assert_eq!(store.load().unwrap().update_frequency_ms, 3000);

    std::fs::write(&path, "updatefrequencyms = \"soon\"").unwrap();
    assert!(store.load().is_err());
}

#[test]
fn test_file_store_path_from_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, FULL_CONFIG).unwrap();
    unsafe { std::env::set_var("RESMON_CONFIG", path.to_str().unwrap()) };
    let store = FileConfigStore::from_env();
    unsafe { std::env::remove_var("RESMON_CONFIG") };
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.load().unwrap().update_frequency_ms, 1500);
}

#[test]
fn test_shared_store_sees_updates_and_validates() {
    let store = SharedConfigStore::new(Settings::default());
    store.update(|s| s.update_frequency_ms = 250).unwrap();
    assert_eq!(store.load().unwrap().update_frequency_ms, 250);

    store.update(|s| s.update_frequency_ms = 0).unwrap();
    assert!(store.load().is_err());
}

#[test]
fn test_example_config_matches_defaults() {
    let settings = Settings::load_from_str(include_str!("../resmon.example.toml")).unwrap();
    assert_eq!(settings.mem_unit(), ByteUnit::GB);
    assert_eq!(
        Settings {
            mem: Default::default(),
            ..settings
        },
        Settings::default()
    );
}
