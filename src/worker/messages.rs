//! Worker message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the plugin
//! thread and the storage worker. Requests are processed strictly in the order
//! they were posted. Every request carries an optional serialized trace context
//! so worker spans link to the plugin span that posted them.
//!
//! # Wire Format
//!
//! Both directions travel as JSON in a Zellij `PluginMessage` payload, using
//! serde's externally tagged enum layout:
//!
//! ```text
//! → {"LoadItems":{"data_dir":"/host/.local/share/ztodo"}}
//! → {"SaveItems":{"items":[{"id":1718000000000,"text":"buy milk",...}]}}
//! → {"LookupItem":{"id":"1718000000000"}}
//! ← {"ItemsLoaded":{"items":[...],"recovered":false}}
//! ← {"ItemsSaved":{"count":1}}
//! ← {"ItemFound":{"item":{...}}} | {"ItemNotFound":{"id":"..."}}
//! ← {"Error":{"message":"..."}}
//! ```
//!
//! `trace_context` is omitted when empty, so messages built outside a traced
//! span stay small.
//!
//! # Example
//!
//! ```
//! use ztodo::worker::WorkerMessage;
//!
//! let message = WorkerMessage::lookup_item("42".to_string());
//! let json = serde_json::to_string(&message).unwrap();
//! assert_eq!(json, r#"{"LookupItem":{"id":"42"}}"#);
//! assert_eq!(message.kind(), "lookup_item");
//! ```

use crate::domain::Item;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context,
    /// which is always the case when tracing was not initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_items(LoadItems { data_dir: PathBuf }),
    save_items(SaveItems { items: Vec<Item> }),
    lookup_item(LookupItem { id: String }),
}

/// Requests sent from the plugin to the storage worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Open storage under `data_dir` and load the collection.
    LoadItems {
        data_dir: PathBuf,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },

    /// Replace the stored collection.
    SaveItems {
        /// Full collection in canonical order.
        items: Vec<Item>,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },

    /// Read one item from storage for the detail view.
    LookupItem {
        /// Route parameter: the item id in string form.
        id: String,

        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The plugin span this request was posted from, if tracing was active.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadItems { trace_context, .. }
            | Self::SaveItems { trace_context, .. }
            | Self::LookupItem { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short name used as a span field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadItems { .. } => "load_items",
            Self::SaveItems { .. } => "save_items",
            Self::LookupItem { .. } => "lookup_item",
        }
    }
}

/// Responses sent from the storage worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The stored collection was loaded.
    ItemsLoaded {
        items: Vec<Item>,

        /// Stored data was unusable and an empty collection was substituted.
        recovered: bool,
    },

    /// The collection was persisted (or was already up to date).
    ItemsSaved {
        /// Number of items in the stored collection.
        count: usize,
    },

    /// The detail lookup found the item.
    ItemFound { item: Item },

    /// The detail lookup found nothing for this id.
    ItemNotFound { id: String },

    /// A storage operation failed.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use pretty_assertions::assert_eq;

    #[test]
    fn builders_skip_trace_context_without_tracing() {
        let message = WorkerMessage::lookup_item("42".to_string());
        assert_eq!(message.trace_context(), None);
        assert_eq!(message.kind(), "lookup_item");

        let json = serde_json::to_string(&message).expect("serialize");
        assert_eq!(json, r#"{"LookupItem":{"id":"42"}}"#);
    }

    #[test]
    fn messages_survive_the_wire() {
        let message = WorkerMessage::save_items(vec![Item::new(ItemId::new(7), "buy milk")]);
        let json = serde_json::to_string(&message).expect("serialize");
        let back: WorkerMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, message);
    }
}
