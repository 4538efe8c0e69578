//! Single-field dialogs (generate count, import path)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Render a dialog with one text field, an optional error and a hint
pub fn render(
    frame: &mut Frame,
    title: &str,
    input: &TextInput,
    error: Option<&str>,
    hint: &str,
) {
    let area = centered_rect_fixed(64, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Hint
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Keys
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        chunks[0],
    );
    frame.render_widget(input, chunks[2]);

    if let Some(error) = error {
        let line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(line), chunks[4]);
    }

    let keys = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Aceptar  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancelar"),
    ]);
    frame.render_widget(Paragraph::new(keys), chunks[5]);
}
