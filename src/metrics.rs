use prometheus::{Encoder, Gauge, GaugeVec, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use once_cell::sync::Lazy;

use crate::prober::RunOutcome;

/// Process-wide metrics for the binary.
pub static METRICS: Lazy<ProbeMetrics> = Lazy::new(|| {
    ProbeMetrics::new().expect("probe metrics register into a fresh registry")
});

/// Prometheus view of probe runs, rendered as text after a run.
pub struct ProbeMetrics {
    registry: Registry,
    latency: Histogram,
    summary: GaugeVec,
    samples: Gauge,
    outcomes: IntCounterVec,
}

impl ProbeMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let latency = Histogram::with_opts(
            HistogramOpts::new("probe_latency_milliseconds", "Probe latency in milliseconds").buckets(vec![
                1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0,
            ]),
        )?;
        registry.register(Box::new(latency.clone()))?;

        let summary = GaugeVec::new(
            Opts::new("probe_latency_summary_milliseconds", "Latency statistics of the last successful run"),
            &["stat"],
        )?;
        registry.register(Box::new(summary.clone()))?;

        let samples = Gauge::new("probe_samples", "Samples recorded by the last successful run")?;
        registry.register(Box::new(samples.clone()))?;

        let outcomes = IntCounterVec::new(
            Opts::new("probe_runs_total", "Probe runs by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(outcomes.clone()))?;

        Ok(Self {
            registry,
            latency,
            summary,
            samples,
            outcomes,
        })
    }

    pub fn record(&self, outcome: &RunOutcome) {
        self.outcomes.with_label_values(&[outcome.kind()]).inc();

        if let RunOutcome::Ok { latencies, stats } = outcome {
            for &ms in latencies {
                self.latency.observe(ms as f64);
            }
            self.summary.with_label_values(&["mean"]).set(stats.mean_ms as f64);
            self.summary
                .with_label_values(&["std_deviation"])
                .set(stats.std_deviation_ms);
            self.summary.with_label_values(&["max"]).set(stats.max_ms as f64);
            self.samples.set(latencies.len() as f64);
        }
    }

    /// Text exposition format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
