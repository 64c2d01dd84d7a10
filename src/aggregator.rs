// Resource registry and the join that turns samples into one line.

use futures_util::future::join_all;
use std::time::Duration;

use crate::config::Settings;
use crate::provider::MetricsProvider;
use crate::resources::{MetricResource, ResourceKind};

/// Separator between resource tokens on the status line.
pub const DELIMITER: &str = "    ";

/// Ordered resource instances; kept across ticks so padding widths persist.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    resources: Vec<MetricResource>,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    /// Every known resource in status-line order.
    pub fn new() -> Self {
        Self::with_kinds(ResourceKind::ALL)
    }

    pub fn with_kinds(kinds: impl IntoIterator<Item = ResourceKind>) -> Self {
        Self {
            resources: kinds.into_iter().map(MetricResource::new).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricResource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Samples every resource concurrently; results come back in registry order.
    pub async fn sample(
        &mut self,
        settings: &Settings,
        provider: &dyn MetricsProvider,
    ) -> Vec<Option<String>> {
        let timeout = Duration::from_millis(settings.sample_timeout_ms);
        join_all(
            self.resources
                .iter_mut()
                .map(|resource| resource.display(settings, provider, timeout)),
        )
        .await
    }
}

/// Drops hidden and blank tokens and joins the rest with [`DELIMITER`].
pub fn join_tokens(tokens: impl IntoIterator<Item = Option<String>>) -> String {
    tokens
        .into_iter()
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// One full sample-and-join over the registry.
pub async fn aggregate(
    registry: &mut ResourceRegistry,
    settings: &Settings,
    provider: &dyn MetricsProvider,
) -> String {
    join_tokens(registry.sample(settings, provider).await)
}
