//! Prometheus metrics for the probe service

/// Prometheus metrics for the probe service
pub struct ProbeMetrics {
    pub probes_total: prometheus::IntCounter,
    pub probes_failed_total: prometheus::IntCounter,
    pub probes_active: prometheus::IntGauge,
    pub measure_duration_seconds: prometheus::Histogram,
    pub gas_used_total: prometheus::IntCounter,
}

impl ProbeMetrics {
    pub fn new() -> Self {
        Self {
            probes_total: prometheus::IntCounter::new(
                "upkeeper_probes_total",
                "Total measure calls processed",
            )
            .unwrap(),
            probes_failed_total: prometheus::IntCounter::new(
                "upkeeper_probes_failed_total",
                "Measure calls whose delegated check failed",
            )
            .unwrap(),
            probes_active: prometheus::IntGauge::new(
                "upkeeper_probes_active",
                "Currently running measure calls",
            )
            .unwrap(),
            measure_duration_seconds: prometheus::Histogram::with_opts(
                prometheus::HistogramOpts::new(
                    "upkeeper_measure_duration_seconds",
                    "Measure call duration",
                )
                .buckets(vec![
                    0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0,
                ]),
            )
            .unwrap(),
            gas_used_total: prometheus::IntCounter::new(
                "upkeeper_gas_used_total",
                "Total gas units measured across all checks",
            )
            .unwrap(),
        }
    }

    pub fn register(&self, registry: &prometheus::Registry) -> Result<(), prometheus::Error> {
        registry.register(Box::new(self.probes_total.clone()))?;
        registry.register(Box::new(self.probes_failed_total.clone()))?;
        registry.register(Box::new(self.probes_active.clone()))?;
        registry.register(Box::new(self.measure_duration_seconds.clone()))?;
        registry.register(Box::new(self.gas_used_total.clone()))?;
        Ok(())
    }
}

impl Default for ProbeMetrics {
    fn default() -> Self {
        Self::new()
    }
}
