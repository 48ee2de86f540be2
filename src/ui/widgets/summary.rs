// src/ui/widgets/summary.rs

use super::{severity_name, severity_style};
use crate::app::App;
use crate::core::classifier::DisplayModel;
use crate::core::lifecycle::ScanLifecycleState;
use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the summary panel: target, scan time, counts per severity and, when the
/// service sent it, the SSL/TLS information block.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Summary");
    let mut lines: Vec<Line> = Vec::new();

    match (app.state(), &app.display) {
        (ScanLifecycleState::Completed(response), Some(DisplayModel::Report(report))) => {
            let target = report.target.as_deref().unwrap_or(&response.target);
            push_header(&mut lines, target, report.timestamp.as_deref());

            lines.push(Line::from("ISSUES FOUND".bold()));
            if report.summary_counts.is_empty() {
                lines.push(Line::from("No summary provided.").fg(Color::DarkGray));
            }
            for (severity, count) in &report.summary_counts {
                lines.push(Line::from(vec![
                    Span::raw(format!("{:<10}", format!("{}:", severity_name(*severity)))),
                    Span::styled(count.to_string(), severity_style(*severity)),
                ]));
            }

            if let Some(fields) = &report.ssl_info {
                lines.push(Line::from(""));
                lines.push(Line::from("SSL/TLS INFORMATION".bold()));
                for field in fields {
                    lines.push(Line::from(field.label.clone()).fg(Color::DarkGray));
                    for value_line in field.value.lines() {
                        lines.push(Line::from(format!("  {}", value_line)));
                    }
                }
            }
        }
        (ScanLifecycleState::Completed(response), Some(DisplayModel::ServiceError(view))) => {
            let target = view.target.as_deref().unwrap_or(&response.target);
            push_header(&mut lines, target, view.timestamp.as_deref());
        }
        (ScanLifecycleState::Failed(failure), _) => {
            let timestamp = failure.timestamp.to_rfc3339();
            push_header(&mut lines, &failure.target, Some(timestamp.as_str()));
        }
        _ => {}
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn push_header(lines: &mut Vec<Line<'static>>, target: &str, timestamp: Option<&str>) {
    lines.push(Line::from("TARGET URL".bold()));
    lines.push(Line::from(target.to_string()).fg(Color::Cyan));
    if let Some(raw) = timestamp {
        lines.push(Line::from(""));
        lines.push(Line::from("SCANNED AT".bold()));
        lines.push(Line::from(display_timestamp(raw)));
    }
    lines.push(Line::from(""));
}

/// Formats a service timestamp for display in local time.
///
/// RFC 3339 values are converted to the local zone. Naive ISO-8601 values (no offset)
/// are shown as they are. Anything else is returned untouched.
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}
