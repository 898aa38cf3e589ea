//! IoT Registry API Library
//!
//! Record keeping for IoT devices and their sensor measurements: the
//! domain model, the SQLite-backed data access layer and the HTTP handlers.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
