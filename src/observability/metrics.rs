use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub bookings_total: IntCounterVec,
    pub walks_in_queue: IntGauge,
    pub matching_latency_seconds: HistogramVec,
    pub availability_denials_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Total bookings by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let walks_in_queue = IntGauge::new(
            "walks_in_queue",
            "Current number of walk requests awaiting a match",
        )
        .expect("valid walks_in_queue metric");

        let matching_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "matching_latency_seconds",
                "Latency of walk matching in seconds",
            ),
            &["outcome"],
        )
        .expect("valid matching_latency_seconds metric");

        let availability_denials_total = IntCounter::new(
            "availability_denials_total",
            "Availability toggles refused because of pending walks today",
        )
        .expect("valid availability_denials_total metric");

        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(walks_in_queue.clone()))
            .expect("register walks_in_queue");
        registry
            .register(Box::new(matching_latency_seconds.clone()))
            .expect("register matching_latency_seconds");
        registry
            .register(Box::new(availability_denials_total.clone()))
            .expect("register availability_denials_total");

        Self {
            registry,
            bookings_total,
            walks_in_queue,
            matching_latency_seconds,
            availability_denials_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
