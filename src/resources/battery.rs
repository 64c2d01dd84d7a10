// Battery charge token

use crate::provider::MetricsProvider;

pub(super) async fn render(provider: &dyn MetricsProvider) -> anyhow::Result<Option<String>> {
    let status = provider.battery().await?;
    if !status.has_battery {
        return Ok(None);
    }
    let percent = status.percent.clamp(0.0, 100.0);
    Ok(Some(format!("$(plug) {percent}%")))
}
