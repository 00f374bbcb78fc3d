//! Prometheus metrics: request counters by route and status, plus a gauge
//! of open chat sockets.

use std::sync::Arc;

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabels {
    pub method: String,
    pub path: String,
    pub status: u16,
}

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    pub http_requests: Family<HttpLabels, Counter>,
    pub chat_connections: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let http_requests = Family::<HttpLabels, Counter>::default();
        registry.register(
            "http_requests",
            "HTTP requests by route and status",
            http_requests.clone(),
        );
        let chat_connections = Gauge::default();
        registry.register(
            "chat_connections",
            "Currently open chat WebSocket connections",
            chat_connections.clone(),
        );
        Self {
            registry: Arc::new(registry),
            http_requests,
            chat_connections,
        }
    }

    pub fn render(&self) -> String {
        let mut buffer = String::new();
        if let Err(err) = encode(&mut buffer, &self.registry) {
            tracing::warn!(%err, "metrics encoding failed");
        }
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_the_exposition() {
        let metrics = Metrics::new();
        metrics
            .http_requests
            .get_or_create(&HttpLabels {
                method: "GET".into(),
                path: "/api/articles".into(),
                status: 200,
            })
            .inc();
        metrics.chat_connections.inc();

        let text = metrics.render();
        assert!(text.contains("http_requests_total"));
        assert!(text.contains("chat_connections"));
    }
}
