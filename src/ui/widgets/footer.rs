// src/ui/widgets/footer.rs

use crate::app::{App, ServiceStatus};
use crate::core::lifecycle::ScanLifecycleState;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer: available actions on the left, service reachability after them.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |label: &'static str| Span::styled(label, Style::new().bold().fg(Color::Yellow));

    let mut spans = match app.state() {
        ScanLifecycleState::Scanning { .. } => vec![
            Span::raw("Scanning... "),
            key("Esc"),
            Span::raw(" to cancel, "),
            key("Q"),
            Span::raw(" to quit."),
        ],
        ScanLifecycleState::Completed(_) => vec![
            key("↑ ↓"),
            Span::raw(" browse findings, "),
            key("Enter"),
            Span::raw(" to scan again, "),
            key("Esc"),
            Span::raw(" to quit."),
        ],
        ScanLifecycleState::Idle | ScanLifecycleState::Failed(_) => vec![
            Span::raw("Press "),
            key("Enter"),
            Span::raw(" to scan, "),
            key("Esc"),
            Span::raw(" to quit."),
        ],
    };

    spans.push(Span::raw("   Service: "));
    spans.push(match &app.service_status {
        ServiceStatus::Unknown => Span::styled("checking", Style::default().fg(Color::DarkGray)),
        ServiceStatus::Online(health) => Span::styled(health.status.clone(), Style::default().fg(Color::Green)),
        ServiceStatus::Unreachable => Span::styled("unreachable", Style::default().fg(Color::Red)),
    });

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
