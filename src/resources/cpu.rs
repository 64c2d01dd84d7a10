// CPU usage, frequency and temperature tokens

use crate::config::Settings;
use crate::provider::MetricsProvider;
use crate::units::{FreqUnit, to_fixed_unit};

pub(super) async fn render_usage(
    settings: &Settings,
    provider: &dyn MetricsProvider,
) -> anyhow::Result<String> {
    let load = provider.current_load().await?;
    let used = (100.0 - load.idle_percent).clamp(0.0, 100.0);
    Ok(format!("$(pulse) {:.*}%", settings.precision(), used))
}

pub(super) async fn render_frequency(
    settings: &Settings,
    provider: &dyn MetricsProvider,
) -> anyhow::Result<String> {
    let freq = provider.cpu_frequency().await?;
    let unit = settings.freq_unit();
    let hz = freq.avg_ghz * FreqUnit::GHz.divisor();
    // Frequencies always keep at least two decimals.
    let precision = settings.precision().max(2);
    Ok(format!(
        "$(dashboard) {} {}",
        to_fixed_unit(hz, unit.divisor(), precision),
        unit
    ))
}

pub(super) async fn render_temperature(
    settings: &Settings,
    provider: &dyn MetricsProvider,
) -> anyhow::Result<Option<String>> {
    let Some(celsius) = provider.cpu_temperature().await?.celsius() else {
        return Ok(None);
    };
    let unit = settings.temp_unit();
    Ok(Some(format!(
        "$(flame) {:.*} {}",
        settings.precision(),
        unit.convert(celsius),
        unit.symbol()
    )))
}
