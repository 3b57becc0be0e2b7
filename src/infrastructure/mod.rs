//! Sandbox filesystem helpers.
//!
//! Inside Zellij's plugin sandbox the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_data_dir};
