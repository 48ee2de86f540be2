// src/lib.rs

//! Terminal client for a remote vulnerability-scanning service: submit a URL, follow
//! the scan lifecycle, browse the severity-ranked findings.

pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod pacing;
pub mod ui;
