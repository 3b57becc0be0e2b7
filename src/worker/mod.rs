//! Storage worker.
//!
//! All persistence I/O runs in a Zellij worker so the plugin thread never blocks
//! on the filesystem. The worker processes requests one at a time, in the order
//! they were posted.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: [`TodoWorker`], the host-independent message processor

pub mod handler;
pub mod messages;

pub use handler::TodoWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Worker name used when registering and addressing the storage worker.
pub const WORKER_NAME: &str = "todo";
