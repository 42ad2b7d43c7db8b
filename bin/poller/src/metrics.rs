//! Prometheus metrics for the poller.
//!
//! All metrics are aggregated in the [`Metrics`] struct. Without an installed
//! recorder every call is a no-op.

use crate::CycleSummary;
use balance::Outcome;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Aggregated metrics for the poller.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        // Cycle metrics
        describe_counter!("poller_cycles_total", "Total number of poll cycles executed");
        describe_counter!(
            "poller_cycles_failure_total",
            "Total number of poll cycles stopped by a setup error"
        );
        describe_histogram!(
            "poller_cycle_duration_seconds",
            "Duration of each poll cycle in seconds"
        );

        // Address metrics
        describe_counter!(
            "poller_addresses_checked_total",
            "Total number of address checks attempted"
        );
        describe_counter!(
            "poller_address_failures_total",
            "Total failed address checks by reason"
        );
        describe_gauge!(
            "poller_sweep_addresses",
            "Number of addresses in the last sweep"
        );

        // Alert metrics
        describe_counter!("poller_alerts_sent_total", "Total alerts delivered");
        describe_counter!(
            "poller_alerts_failed_total",
            "Total alerts the notifier failed to deliver"
        );
    }

    /// Record a completed or aborted cycle.
    pub fn record_cycle(&self, success: bool, duration: Duration) {
        counter!("poller_cycles_total").increment(1);
        histogram!("poller_cycle_duration_seconds").record(duration.as_secs_f64());

        if !success {
            counter!("poller_cycles_failure_total").increment(1);
        }
    }

    /// Record per-address results of a sweep.
    pub fn record_sweep(&self, summary: &CycleSummary) {
        gauge!("poller_sweep_addresses").set(summary.checked() as f64);
        counter!("poller_addresses_checked_total").increment(summary.checked() as u64);

        for report in &summary.reports {
            match &report.outcome {
                Outcome::CallFailed(_) => {
                    counter!("poller_address_failures_total", "reason" => "call").increment(1);
                }
                Outcome::DecodeFailed(_) => {
                    counter!("poller_address_failures_total", "reason" => "decode").increment(1);
                }
                Outcome::Checked { .. } => {}
            }
        }

        counter!("poller_alerts_sent_total").increment(summary.alerts_sent() as u64);
        counter!("poller_alerts_failed_total").increment(summary.alerts_failed() as u64);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
