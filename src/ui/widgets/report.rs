// src/ui/widgets/report.rs

use super::{severity_name, severity_style};
use crate::app::{App, SPINNER_CHARS};
use crate::core::classifier::{DisplayModel, Findings, ReportView, ServiceErrorView};
use crate::core::lifecycle::ScanLifecycleState;
use crate::core::models::ScanFailure;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Renders the main report area for whatever state the scan lifecycle is in.
pub fn render_report(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Scan Results (Navigate with ↑ ↓)");

    match app.state() {
        ScanLifecycleState::Idle => {
            let content = Paragraph::new("Enter a URL and press Enter to start the scan.")
                .alignment(Alignment::Center);
            frame.render_widget(content.block(main_block), area);
        }
        ScanLifecycleState::Scanning { ticket, .. } => {
            let spinner_char = SPINNER_CHARS[app.spinner_frame % SPINNER_CHARS.len()];
            let content = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                Span::raw(format!("Scanning {}... Please wait.", ticket.target)),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(content.block(main_block), area);
        }
        ScanLifecycleState::Failed(failure) => {
            let content = failure_text(failure);
            frame.render_widget(error_paragraph(content).block(main_block), area);
        }
        ScanLifecycleState::Completed(_) => match app.display.clone() {
            Some(DisplayModel::ServiceError(view)) => {
                frame.render_widget(error_paragraph(service_error_text(&view)).block(main_block), area);
            }
            Some(DisplayModel::Report(report)) => {
                let inner_area = main_block.inner(area);
                frame.render_widget(main_block, area);
                render_findings(frame, app, &report, inner_area);
            }
            None => frame.render_widget(Paragraph::new("").block(main_block), area),
        },
    }
}

fn error_paragraph(text: Text<'static>) -> Paragraph<'static> {
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
}

fn failure_text(failure: &ScanFailure) -> Text<'static> {
    Text::from(vec![
        Line::from(""),
        Line::from("✗ Scan Error".bold().fg(Color::Red)),
        Line::from(""),
        Line::from(failure.message.clone()),
        Line::from(""),
        Line::from(format!("Target: {}", failure.target)).fg(Color::DarkGray),
    ])
}

fn service_error_text(view: &ServiceErrorView) -> Text<'static> {
    let mut lines = vec![
        Line::from(""),
        Line::from(format!("✗ {}", view.title)).bold().fg(Color::Red),
        Line::from(""),
        Line::from(view.message.clone()),
    ];
    if let Some(target) = &view.target {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Target: {}", target)).fg(Color::DarkGray));
    }
    Text::from(lines)
}

fn render_findings(frame: &mut Frame, app: &mut App, report: &ReportView, area: Rect) {
    let list = match &report.findings {
        Findings::Clean => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from("✓ No Critical Vulnerabilities Found".bold().fg(Color::Green)),
                Line::from(""),
                Line::from("The target appears to have good security practices in place."),
            ]);
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
            return;
        }
        Findings::Detected(list) => list,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = list
        .iter()
        .map(|vuln| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", severity_name(vuln.severity).to_uppercase()),
                    severity_style(vuln.severity),
                ),
                Span::raw(vuln.title.clone()),
            ]))
        })
        .collect();

    let findings_list = List::new(items)
        .block(Block::default().title(format!("Detected Vulnerabilities ({})", list.len())))
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(findings_list, chunks[0], &mut app.findings_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let Some(vuln) = app.selected_finding() else {
        let p = Paragraph::new("Select an item above to see details.")
            .alignment(Alignment::Center)
            .block(detail_block);
        frame.render_widget(p, chunks[1]);
        return;
    };

    let mut text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(severity_name(vuln.severity).to_uppercase(), severity_style(vuln.severity)),
            Span::raw("  "),
            Span::raw(vuln.title.clone()).bold(),
        ]),
        Line::from(""),
        Line::from("WHAT IT IS:".yellow().bold()),
        Line::from(vuln.description.clone()),
    ];
    if let Some(recommendation) = &vuln.recommendation {
        text.push(Line::from(""));
        text.push(Line::from("HOW TO FIX:".yellow().bold()));
        text.push(Line::from(recommendation.clone()));
    }
    if !vuln.references.is_empty() {
        text.push(Line::from(""));
        text.push(Line::from("REFERENCES:".yellow().bold()));
        for reference in &vuln.references {
            text.push(Line::from(Span::styled(
                format!("- {}", reference),
                Style::default().fg(Color::Magenta).underlined(),
            )));
        }
    }

    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
    frame.render_widget(p, chunks[1]);
}
