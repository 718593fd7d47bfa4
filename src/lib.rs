//! Synthetic transaction-log generation and SFTP upload.
//!
//! Two binaries share this library: `generate` writes per-client-per-month
//! CSV logs under `./transaction-logs/`, and `upload` pushes that tree to a
//! remote SFTP endpoint.

pub mod config;
pub mod csv_handler;
pub mod generator;
pub mod record;
pub mod uploader;
