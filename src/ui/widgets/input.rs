// src/ui/widgets/input.rs
use crate::app::App;
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};

/// Renders the input box widget.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_busy() { "Target URL (locked while scanning)" } else { "Target URL" };
    let input_block = Block::default().borders(Borders::ALL).title(title);

    let paragraph = if app.input.is_empty() && !app.is_busy() {
        Paragraph::new("https://example.com").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.input.as_str()).style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(paragraph.block(input_block), area);

    // The cursor is only shown while the input is editable.
    if !app.is_busy() {
        frame.set_cursor_position((
            area.x + app.input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}
