//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported batch.
pub const SERVICE_NAME: &str = "Beerbar";

/// File name of the span export inside the data directory.
pub const TRACE_FILE_NAME: &str = "beerbar-otlp.json";

/// Default filter directive when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: `EnvFilter` + OpenTelemetry file export.
///
/// Spans go to `/data/beerbar-otlp.json` (see
/// [`get_data_dir`](crate::infrastructure::get_data_dir)). Observability is
/// optional: if the data directory cannot be created, or a subscriber is
/// already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(build_filter(config.trace_level.as_deref()))
        .with(otel_layer)
        .try_init();
}

/// Builds the span filter, falling back to [`DEFAULT_TRACE_LEVEL`] when the
/// configured directive does not parse.
fn build_filter(trace_level: Option<&str>) -> EnvFilter {
    let directive = trace_level.unwrap_or(DEFAULT_TRACE_LEVEL);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_uses_configured_level() {
        assert_eq!(build_filter(Some("debug")).to_string(), "debug");
        assert_eq!(build_filter(Some("beerbar=trace")).to_string(), "beerbar=trace");
    }

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(build_filter(None).to_string(), "info");
        assert_eq!(build_filter(Some("beerbar=loud")).to_string(), "info");
    }
}
