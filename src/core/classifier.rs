// src/core/classifier.rs

//! Turns the loosely-typed scan payload into something the UI can render without
//! further checks. Every field is read on its own and falls back to a default, so a
//! half-broken payload still renders whatever parts are usable.

use crate::core::models::{DetailField, Severity, Vulnerability};
use serde_json::{Map, Value};
use tracing::debug;

pub const SERVICE_ERROR_TITLE: &str = "Scan Error";
const TOTAL_ISSUES_KEY: &str = "total_issues";
const DEFAULT_TITLE: &str = "Security Issue";
const DEFAULT_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayModel {
    /// The service answered but reported an error of its own.
    ServiceError(ServiceErrorView),
    Report(ReportView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceErrorView {
    pub title: String,
    pub message: String,
    pub target: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub target: Option<String>,
    pub timestamp: Option<String>,
    pub summary_counts: Vec<(Severity, u64)>,
    pub findings: Findings,
    pub ssl_info: Option<Vec<DetailField>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Findings {
    /// Nothing was reported. Rendered as its own "clean" panel, not as an empty list.
    Clean,
    Detected(Vec<Vulnerability>),
}

impl Findings {
    pub fn as_slice(&self) -> &[Vulnerability] {
        match self {
            Findings::Clean => &[],
            Findings::Detected(list) => list,
        }
    }
}

/// Classifies a raw payload. Pure: the same input always yields an equal model.
pub fn classify(payload: &Value) -> DisplayModel {
    let empty = Map::new();
    let object = payload.as_object().unwrap_or(&empty);

    let target = string_field(object, "url");
    let timestamp = string_field(object, "timestamp");

    if let Some(message) = object.get("error").and_then(error_message) {
        debug!(%message, "Payload carries a service error.");
        return DisplayModel::ServiceError(ServiceErrorView {
            title: SERVICE_ERROR_TITLE.to_string(),
            message,
            target,
            timestamp,
        });
    }

    let report = ReportView {
        target,
        timestamp,
        summary_counts: summary_counts(object.get("summary")),
        findings: findings(object.get("vulnerabilities")),
        ssl_info: object.get("ssl_info").and_then(detail_fields),
    };
    debug!(
        findings = report.findings.as_slice().len(),
        has_ssl_info = report.ssl_info.is_some(),
        "Payload classified as report."
    );
    DisplayModel::Report(report)
}

/// The `error` field only counts when it is truthy: `null`, `false`, `0` and `""` are ignored.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn summary_counts(summary: Option<&Value>) -> Vec<(Severity, u64)> {
    let Some(summary) = summary.and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut counts: Vec<(Severity, u64)> = Vec::new();
    for (key, value) in summary {
        if key == TOTAL_ISSUES_KEY {
            continue;
        }
        let Ok(severity) = key.parse::<Severity>() else {
            debug!(key = %key, "Skipping summary entry that is not a severity.");
            continue;
        };
        let Some(count) = value.as_u64() else {
            debug!(key = %key, "Skipping summary entry with a non-integer count.");
            continue;
        };
        // "Critical" and "critical" in one payload: first one wins.
        if counts.iter().all(|(seen, _)| *seen != severity) {
            counts.push((severity, count));
        }
    }
    counts.sort_by_key(|(severity, _)| *severity);
    counts
}

fn findings(vulnerabilities: Option<&Value>) -> Findings {
    let items = vulnerabilities.and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    if items.is_empty() {
        return Findings::Clean;
    }
    Findings::Detected(items.iter().map(vulnerability).collect())
}

/// Entries that are not objects still count as findings, with every field defaulted.
fn vulnerability(item: &Value) -> Vulnerability {
    let empty = Map::new();
    let object = item.as_object().unwrap_or_else(|| {
        debug!("Vulnerability entry is not an object, using defaults.");
        &empty
    });

    let non_empty = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Vulnerability {
        severity: Severity::from_json(object.get("severity")),
        title: non_empty("title")
            .or_else(|| non_empty("type"))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: non_empty("description").unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        recommendation: non_empty("recommendation"),
        references: object
            .get("references")
            .and_then(Value::as_array)
            .map(|refs| refs.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default(),
    }
}

fn detail_fields(value: &Value) -> Option<Vec<DetailField>> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(key, value)| DetailField {
                label: humanize_key(key),
                value: render_value(value),
            })
            .collect(),
    )
}

/// `not_valid_after` -> `Not Valid After`. Only the first character of each word is
/// touched, the rest keeps its original case. Words are runs of ASCII letters and digits.
pub fn humanize_key(key: &str) -> String {
    let mut humanized = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_ascii_alphanumeric() {
            if at_word_start {
                humanized.push(c.to_ascii_uppercase());
            } else {
                humanized.push(c);
            }
            at_word_start = false;
        } else {
            humanized.push(c);
            at_word_start = true;
        }
    }
    humanized
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(model: DisplayModel) -> ReportView {
        match model {
            DisplayModel::Report(report) => report,
            other => panic!("expected a report, got {other:?}"),
        }
    }

    fn full_payload() -> Value {
        json!({
            "url": "example.com",
            "timestamp": "2024-01-01T00:00:00Z",
            "summary": {"total_issues": 3, "low": 1, "critical": 1, "high": 1, "medium": 0, "info": 0},
            "vulnerabilities": [
                {"severity": "low", "title": "Server banner", "description": "Version leaked"},
                {"severity": "CRITICAL", "title": "Expired Certificate", "description": "...",
                 "recommendation": "Renew certificate", "references": ["https://example.org/cve"]},
                {"severity": "High", "type": "Missing HSTS"}
            ]
        })
    }

    #[test]
    fn keeps_payload_order_and_counts() {
        let view = report(classify(&full_payload()));

        let titles: Vec<&str> = view.findings.as_slice().iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["Server banner", "Expired Certificate", "Missing HSTS"]);
        assert_eq!(view.target.as_deref(), Some("example.com"));
        assert_eq!(view.timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn summary_is_ranked_and_drops_total_issues() {
        let view = report(classify(&full_payload()));
        assert_eq!(
            view.summary_counts,
            vec![
                (Severity::Critical, 1),
                (Severity::High, 1),
                (Severity::Medium, 0),
                (Severity::Low, 1),
                (Severity::Info, 0),
            ]
        );
    }

    #[test]
    fn summary_skips_unknown_keys_and_bad_counts() {
        let payload = json!({
            "summary": {"total_issues": 9, "bogus": 4, "high": "two", "Low": 2},
            "vulnerabilities": []
        });
        assert_eq!(report(classify(&payload)).summary_counts, vec![(Severity::Low, 2)]);
    }

    #[test]
    fn vulnerability_fields_fall_back_to_defaults() {
        let payload = json!({"vulnerabilities": [{"severity": null}, "not an object", {"title": ""}]});
        let view = report(classify(&payload));
        let list = view.findings.as_slice();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].severity, Severity::Info);
        assert_eq!(list[0].title, DEFAULT_TITLE);
        assert_eq!(list[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(list[0].recommendation, None);
        assert!(list[0].references.is_empty());
        assert_eq!(list[1].severity, Severity::Info);
        assert_eq!(list[1].title, DEFAULT_TITLE);
        assert_eq!(list[1].description, DEFAULT_DESCRIPTION);
        assert_eq!(list[2].title, DEFAULT_TITLE);
    }

    #[test]
    fn non_object_entries_are_findings_not_a_clean_scan() {
        let view = report(classify(&json!({"vulnerabilities": ["SQL injection in /login"]})));
        match view.findings {
            Findings::Detected(list) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].severity, Severity::Info);
                assert_eq!(list[0].title, DEFAULT_TITLE);
                assert_eq!(list[0].description, DEFAULT_DESCRIPTION);
            }
            Findings::Clean => panic!("a non-empty vulnerabilities array must not be clean"),
        }
    }

    #[test]
    fn references_keep_only_strings() {
        let payload = json!({"vulnerabilities": [{"references": ["https://a", 4, null, "https://b"]}]});
        let view = report(classify(&payload));
        assert_eq!(view.findings.as_slice()[0].references, ["https://a", "https://b"]);
    }

    #[test]
    fn missing_or_empty_vulnerabilities_is_clean() {
        let empty = json!({"url": "clean.example.com", "summary": {}, "vulnerabilities": []});
        assert_eq!(report(classify(&empty)).findings, Findings::Clean);

        let absent = json!({"url": "clean.example.com"});
        assert_eq!(report(classify(&absent)).findings, Findings::Clean);

        let wrong_type = json!({"vulnerabilities": {"oops": true}});
        assert_eq!(report(classify(&wrong_type)).findings, Findings::Clean);
    }

    #[test]
    fn error_field_short_circuits() {
        let payload = json!({
            "error": "timeout contacting target",
            "url": "slow.example.com",
            "timestamp": "2024-01-01T00:00:00Z",
            "vulnerabilities": [{"title": "ignored"}]
        });
        match classify(&payload) {
            DisplayModel::ServiceError(view) => {
                assert_eq!(view.title, SERVICE_ERROR_TITLE);
                assert_eq!(view.message, "timeout contacting target");
                assert_eq!(view.target.as_deref(), Some("slow.example.com"));
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    #[test]
    fn falsy_error_field_is_ignored() {
        for error in [Value::Null, json!(false), json!(""), json!(0), json!(0.0)] {
            let payload = json!({"error": error, "vulnerabilities": []});
            assert!(matches!(classify(&payload), DisplayModel::Report(_)));
        }
    }

    #[test]
    fn ssl_info_is_humanized_in_payload_order() {
        let payload = json!({
            "ssl_info": {
                "version": "TLSv1.3",
                "not_valid_after": "2030-01-01",
                "key_bits": 2048,
                "subject_alt_names": ["a.example", "b.example"],
                "self_signed": false
            }
        });
        let fields = report(classify(&payload)).ssl_info.unwrap();
        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Version", "Not Valid After", "Key Bits", "Subject Alt Names", "Self Signed"]);
        assert_eq!(fields[0].value, "TLSv1.3");
        assert_eq!(fields[2].value, "2048");
        assert_eq!(fields[3].value, "[\n  \"a.example\",\n  \"b.example\"\n]");
        assert_eq!(fields[4].value, "false");
    }

    #[test]
    fn ssl_info_that_is_not_an_object_is_absent() {
        assert_eq!(report(classify(&json!({"ssl_info": "n/a"}))).ssl_info, None);
        assert_eq!(report(classify(&json!({}))).ssl_info, None);
    }

    #[test]
    fn humanize_capitalizes_every_word() {
        assert_eq!(humanize_key("cipher_suite"), "Cipher Suite");
        assert_eq!(humanize_key("tls-version"), "Tls-Version");
        assert_eq!(humanize_key("issuedTo"), "IssuedTo");
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn humanize_only_treats_ascii_as_word_characters() {
        assert_eq!(humanize_key("éa"), "éA");
        assert_eq!(humanize_key("clé_publique"), "Clé Publique");
    }

    #[test]
    fn non_object_payload_degrades_to_clean_report() {
        let view = report(classify(&json!([1, 2, 3])));
        assert_eq!(view.findings, Findings::Clean);
        assert!(view.summary_counts.is_empty());
        assert!(view.target.is_none());
    }

    #[test]
    fn classification_is_idempotent() {
        let payload = full_payload();
        assert_eq!(classify(&payload), classify(&payload));
    }
}
