//! Storage layer for the persisted item collection.
//!
//! The collection is stored as a single JSON blob under one durable key. The
//! layer is split into a backend port and a repository that owns the format.
//!
//! # Modules
//!
//! - `backend`: [`Storage`] key-value trait
//! - `json`: file-per-key backend with atomic writes
//! - `memory`: in-process backend
//! - `models`: on-disk record shape and blob codec
//! - `repository`: load/save/find over the `todos` key

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
pub mod repository;

pub use backend::Storage;
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use models::{decode_items, encode_items, ItemRecord};
pub use repository::{ItemRepository, LoadedItems, ITEMS_KEY};
