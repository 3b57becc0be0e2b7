//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → ztodo-otlp.json
//! ```
//!
//! The trace file lives in the data directory next to `todos.json` and rotates
//! at 10 MiB, keeping 3 backups (`ztodo-otlp.json.1` to `.3`).
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `exporter`: the file-backed `SpanExporter`
//! - `otlp`: OTLP-JSON encoding of span batches
//! - `rotation`: the size-rotated log file

mod exporter;
mod init;
mod otlp;
mod rotation;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE};
pub use rotation::RotationPolicy;
