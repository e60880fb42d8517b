use crate::constants::{
    DEFAULT_METRICS_PORT, METRICS_PORT_ENV, METRIC_MUTATIONS, METRIC_REJECTED,
    METRIC_VALIDATION_FAILURES,
};
use crate::error::MenuError;
use std::net::SocketAddr;
use tracing::{info, warn};

pub fn init_metrics() {
    let port: u16 = std::env::var(METRICS_PORT_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_METRICS_PORT);
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed (possibly already installed): {}", e),
    }
}

/// Kinds of committed catalog mutation.
#[derive(Debug, Clone, Copy)]
pub enum MutationKind {
    Add,
    Update,
    Delete,
}

impl MutationKind {
    fn as_str(self) -> &'static str {
        match self {
            MutationKind::Add => "add",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

pub fn mutation_committed(kind: MutationKind) {
    metrics::counter!(METRIC_MUTATIONS, "kind" => kind.as_str()).increment(1);
}

pub fn operation_rejected(err: &MenuError) {
    if let MenuError::Validation { .. } = err {
        metrics::counter!(METRIC_VALIDATION_FAILURES).increment(1);
    } else {
        metrics::counter!(METRIC_REJECTED, "reason" => err.kind()).increment(1);
    }
}
