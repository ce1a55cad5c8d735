use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Prometheus counters for the admin API, on a registry owned by the server.
pub struct Metrics {
    registry: Registry,
    pub http_requests: IntCounterVec,
    pub menu_mutations: IntCounterVec,
    pub logins: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let http_requests = IntCounterVec::new(
            Opts::new("restaurant_http_requests_total", "HTTP requests handled"),
            &["method", "route", "status"],
        )?;
        let menu_mutations = IntCounterVec::new(
            Opts::new("restaurant_menu_mutations_total", "Menu create/update/delete operations"),
            &["op"],
        )?;
        let logins = IntCounterVec::new(
            Opts::new("restaurant_logins_total", "Admin login attempts"),
            &["outcome"],
        )?;
        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(menu_mutations.clone()))?;
        registry.register(Box::new(logins.clone()))?;
        Ok(Self { registry, http_requests, menu_mutations, logins })
    }

    pub fn encode(&self) -> (axum::http::StatusCode, String) {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("metrics encode error: {e}"),
            );
        }
        (axum::http::StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
    }
}
