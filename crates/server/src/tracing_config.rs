//! Tracing configuration: a compact stdout formatter, plus OTLP span export when a collector
//! endpoint is configured.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tracing_subscriber::{Layer, layer::SubscriberExt};

use crate::{
    config::TracingConfig,
    error::{ServerError, ServerResult},
};

/// Keeps the span exporter alive, flushing it on [`TracingGuard::shutdown`].
#[derive(Debug)]
#[must_use = "dropping the guard without calling shutdown may lose buffered spans"]
pub struct TracingGuard {
    /// Present when an OTLP endpoint was configured.
    tracer_provider: Option<opentelemetry_sdk::trace::TracerProvider>,
}

impl TracingGuard {
    /// Flush and stop the span exporter, if one is running.
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to shut down tracer provider");
            }
        }
    }
}

/// Build the OTLP tracer provider that sends spans to `endpoint` over gRPC.
fn init_tracer_provider(endpoint: &str) -> ServerResult<opentelemetry_sdk::trace::TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| ServerError::Internal(format!("Failed to create OTLP exporter: {e}")))?;

    let provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![
            opentelemetry::KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
            opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]))
        .build();

    opentelemetry::global::set_tracer_provider(provider.clone());

    Ok(provider)
}

/// Install the global subscriber.
///
/// Stdout verbosity follows `RUST_LOG`, defaulting to `info`. Spans are exported only when
/// `config.otlp_endpoint` is set.
///
/// # Errors
/// Fails if the exporter cannot be built or a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> ServerResult<TracingGuard> {
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let tracer_provider = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer_provider)
        .transpose()?;

    // Keep the exporter's own transport crates out of the exported spans.
    let otel_filter = tracing_subscriber::filter::Targets::new()
        .with_target(env!("CARGO_CRATE_NAME"), tracing::Level::TRACE)
        .with_target("tower_http", tracing::Level::DEBUG)
        .with_target("h2", tracing::Level::ERROR)
        .with_target("tonic", tracing::Level::ERROR)
        .with_target("hyper", tracing::Level::ERROR)
        .with_default(tracing::Level::INFO);

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(env!("CARGO_PKG_NAME")))
            .with_filter(otel_filter)
    });

    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_filter(env_filter);

    let subscriber = tracing_subscriber::Registry::default()
        .with(otel_layer)
        .with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ServerError::Internal(format!("Failed to set subscriber: {e}")))?;

    Ok(TracingGuard { tracer_provider })
}
