// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

/// Message shown for every transport-level failure. The real cause only goes to the log.
pub const CONNECTIVITY_FAILURE_MESSAGE: &str = "Failed to connect to scanner service";

// --- Severity ---

/// Urgency of a finding. The declaration order is the ranking: `Critical` sorts first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Parses a raw severity string. Anything unrecognized, or nothing at all, is `Info`.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(Severity::Info)
    }

    /// Same as [`Severity::normalize`] but straight from a JSON field, so `null`,
    /// numbers and objects all land on `Info`.
    pub fn from_json(value: Option<&Value>) -> Self {
        Self::normalize(value.and_then(Value::as_str))
    }

    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }
}

// --- Request ---

/// A validated scan target. The only client-side rule is "not blank after trimming".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub target: String,
}

impl ScanRequest {
    pub fn parse(raw_target: &str) -> Option<Self> {
        let target = raw_target.trim();
        if target.is_empty() {
            return None;
        }
        Some(Self { target: target.to_string() })
    }
}

/// Body of `POST /api/scan`.
#[derive(Debug, Serialize)]
pub struct ScanRequestBody<'a> {
    pub url: &'a str,
}

// --- Outcomes ---

/// A successful exchange: the payload is kept exactly as the service sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResponse {
    pub target: String,
    pub received_at: DateTime<Utc>,
    pub body: Value,
}

/// A scan that never produced a usable payload. Serializes to the same
/// `{ error, url, timestamp }` shape the service uses for its own errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    #[serde(rename = "url")]
    pub target: String,
    #[serde(rename = "error")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ScanFailure {
    pub fn connectivity(target: &str) -> Self {
        Self {
            target: target.to_string(),
            message: CONNECTIVITY_FAILURE_MESSAGE.to_string(),
            timestamp: Utc::now(),
        }
    }
}

// --- Classified Results ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vulnerability {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: Option<String>,
    pub references: Vec<String>,
}

/// One humanized key/value row of a detail block such as the SSL/TLS information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// Answer of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
