//! Docmark — page-positioned bookmarks on documents, owned by the user who placed them.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod stores;
pub mod types;
