//! Internal library crate for trek.
//!
//! The shipped application is the `trek` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `trek` binary and is not meant for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
