//! Status bar view
//!
//! Shows the current file, unsaved changes, the last message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Archivo: ", Style::default().fg(Color::White)),
        Span::styled(
            app.storage.path().display().to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if app.storage.is_dirty() {
        spans.push(Span::styled(
            " [sin guardar]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(ref message) = app.status_message {
        let color = if app.status_is_error {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(color)));
    }

    // Key hints (right-aligned)
    let hints = " ?:Ayuda  /:Buscar  Ctrl+S:Guardar  q:Salir ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
