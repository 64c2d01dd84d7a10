// Memory token: active/total in the configured unit

use crate::config::Settings;
use crate::provider::MetricsProvider;
use crate::units::to_fixed_unit;

pub(super) async fn render(
    settings: &Settings,
    provider: &dyn MetricsProvider,
) -> anyhow::Result<String> {
    let memory = provider.memory().await?;
    let unit = settings.mem_unit();
    let precision = settings.precision();
    Ok(format!(
        "$(ellipsis) {}/{} {}",
        to_fixed_unit(memory.active as f64, unit.divisor(), precision),
        to_fixed_unit(memory.total as f64, unit.divisor(), precision),
        unit
    ))
}
