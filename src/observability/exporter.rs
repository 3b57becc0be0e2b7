//! File-backed span exporter and the tracer provider built around it.
//!
//! Spans go through the SDK's simple processor, so each finished span is
//! encoded and written before the span's `drop` returns. A Zellij plugin has
//! no async runtime to drive a batch processor, and the returned future is
//! always already resolved.
//!
//! # Errors
//!
//! Write failures are returned to the SDK as [`TraceError`]; the SDK reports
//! them through its global error handler and drops the span. After
//! `shutdown` every export fails without touching the file.

use super::otlp::OtlpJsonEncoder;
use super::rotation::{RotatingFile, RotationPolicy};
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one OTLP-JSON line.
#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    encoder: OtlpJsonEncoder,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }
}

/// Builds a provider that exports every finished span synchronously to `path`.
///
/// # Parameters
///
/// - `path`: live trace file; rotated copies sit beside it
/// - `policy`: rotation limits for the trace file
/// - `resource`: attached to the provider and repeated in every batch
/// - `scope`: instrumentation scope name written with each batch
#[must_use]
pub fn file_tracer_provider(
    path: PathBuf,
    policy: RotationPolicy,
    resource: Resource,
    scope: &'static str,
) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(path, policy),
        encoder: OtlpJsonEncoder::new(resource.clone(), scope),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ztodo-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "ztodo")]);
        let provider =
            file_tracer_provider(path.clone(), RotationPolicy::default(), resource, "ztodo");

        provider.tracer("ztodo").in_span("save_items", |_cx| {});

        let contents = std::fs::read_to_string(&path).expect("trace file");
        let line = contents.lines().next().expect("one batch");
        let doc: serde_json::Value = serde_json::from_str(line).expect("json");
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "save_items"
        );
    }
}
