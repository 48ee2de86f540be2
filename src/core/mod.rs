// src/core/mod.rs

/// Data structures shared across the application: `Severity`, `ScanRequest`,
/// `ScanResponse`, `ScanFailure` and the classified `Vulnerability`.
pub mod models;

/// HTTP access to the remote scanning service and the `ScanService` seam.
pub mod client;

/// The scan state machine.
pub mod lifecycle;

/// Maps raw payloads to display-ready, severity-ranked models.
pub mod classifier;
