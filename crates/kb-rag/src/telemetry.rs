//! Tracing and telemetry initialization

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TelemetryConfig;

static INIT: Once = Once::new();

/// Initialize tracing and telemetry wiring exactly once.
///
/// Safe to call more than once; subsequent calls return without effect.
/// Trace export itself is handled by an external OTLP collector that reads
/// the standard `OTEL_EXPORTER_OTLP_*` variables published here.
pub fn init(config: &TelemetryConfig) {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "kb_rag=info,tower_http=info".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        match config.basic_auth() {
            Some(auth) => {
                std::env::set_var("OTEL_EXPORTER_OTLP_ENDPOINT", &config.otlp_endpoint);
                std::env::set_var(
                    "OTEL_EXPORTER_OTLP_HEADERS",
                    format!("Authorization=Basic {}", auth),
                );
                tracing::info!("OTLP trace export configured for {}", config.otlp_endpoint);
            }
            None => {
                tracing::info!("Langfuse credentials not set, trace export disabled");
            }
        }
    });
}
