use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use shuttle_axum::axum::{routing::get, Router};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

/// Register descriptions for the document store counters.
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("documents_uploaded_total", "Documents added to the store.");
        describe_counter!("documents_deleted_total", "Documents removed from the store.");
    });
}

pub fn record_uploaded(n: usize) {
    ensure_metrics_described();
    counter!("documents_uploaded_total").increment(n as u64);
}

pub fn record_deleted() {
    ensure_metrics_described();
    counter!("documents_deleted_total").increment(1);
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if one is already set.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// `/metrics` route (Prometheus text format); merged into the app by the binary.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route("/metrics", get(move || std::future::ready(handle.render())))
    }
}
