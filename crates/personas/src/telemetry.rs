//! Tracing subscriber setup for the `personas` binary.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,personas=debug,personas_chain=debug"
    } else {
        "warn,personas=info,personas_chain=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
}

/// Initialize console-only telemetry.
///
/// Respects `RUST_LOG`; otherwise `verbose` selects the default level.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_console_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Initialize OpenTelemetry with a stdout span exporter alongside console logs.
///
/// # Errors
///
/// Returns error if subscriber initialization fails.
#[cfg(feature = "observability")]
pub fn init_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::{
        Resource,
        trace::{RandomIdGenerator, Sampler, TracerProvider},
    };
    use opentelemetry_stdout::SpanExporter;
    use tracing_subscriber::Layer;

    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::default())
        .build();

    let tracer = provider.tracer("personas");
    let _ = opentelemetry::global::set_tracer_provider(provider);

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(env_filter(verbose));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(verbose));

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Shutdown OpenTelemetry and flush pending spans.
#[cfg(feature = "observability")]
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_lowers_default_level() {
        assert!(default_filter(true).contains("personas_chain=debug"));
        assert!(default_filter(false).contains("personas_chain=info"));
    }
}
