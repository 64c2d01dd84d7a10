// Network token. Counters are collected and logged but nothing is rendered yet.

use tracing::{debug, trace};

use crate::provider::MetricsProvider;

pub(super) async fn render(provider: &dyn MetricsProvider) -> String {
    let interfaces = match provider.network_interfaces().await {
        Ok(interfaces) => interfaces,
        Err(e) => {
            debug!(error = %e, "network interfaces unavailable");
            return String::new();
        }
    };
    for iface in &interfaces {
        match provider.network_stats(&iface.iface).await {
            Ok(stats) => trace!(
                iface = %stats.iface,
                rx_bytes = stats.rx_bytes,
                tx_bytes = stats.tx_bytes,
                rx_sec = stats.rx_sec,
                tx_sec = stats.tx_sec,
                "network counters"
            ),
            Err(e) => debug!(iface = %iface.iface, error = %e, "network stats unavailable"),
        }
    }
    // TODO: render per-interface throughput once a token format is settled on.
    String::new()
}
