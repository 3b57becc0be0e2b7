//! Tracing subscriber setup.
//!
//! The plugin and its worker run as separate WASM instances, and each calls
//! [`init_tracing`] once: the plugin from `load` with the configured level, the
//! worker on its first `LoadItems` with the default. Both append to the same
//! trace file.
//!
//! # Configuration
//!
//! | Key           | Effect                                     |
//! |---------------|--------------------------------------------|
//! | `trace_level` | `EnvFilter` directive, default `info`      |
//! | `data_dir`    | directory holding `ztodo-otlp.json`        |

use super::exporter::file_tracer_provider;
use super::rotation::RotationPolicy;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use std::sync::OnceLock;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name on every exported span.
pub const SERVICE_NAME: &str = "ztodo";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "ztodo-otlp.json";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber exporting spans to `<data_dir>/ztodo-otlp.json`.
///
/// `level` is an `EnvFilter` directive such as `"debug"` or
/// `"ztodo=trace,info"`; `None` means `info`, and an unparsable directive falls
/// back to `info` too. Only the first call in a process has any effect. When the
/// data directory cannot be created tracing stays off.
///
/// # Parameters
///
/// - `data_dir`: created if missing; the trace file is written inside it
/// - `level`: filter directive, `None` for the default
pub fn init_tracing(data_dir: &Path, level: Option<&str>) {
    INITIALIZED.get_or_init(|| {
        if std::fs::create_dir_all(data_dir).is_err() {
            return;
        }

        let filter = EnvFilter::try_new(level.unwrap_or("info"))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
        let provider = file_tracer_provider(
            data_dir.join(TRACE_FILE),
            RotationPolicy::default(),
            resource,
            SERVICE_NAME,
        );
        let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(otel_layer)
            .try_init();
    });
}
