//! Yes/no question over the main screen

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;

const WIDTH: u16 = 60;

/// Render the question; `details` are shown dimmed under it
pub fn render(frame: &mut Frame, title: &str, question: &str, details: &[String]) {
    // borders + question + blank lines around the details
    let height = details.len() as u16 + 6;
    let area = centered_rect_fixed(WIDTH, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from(Span::styled(
        question,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    if !details.is_empty() {
        lines.push(Line::from(""));
        lines.extend(
            details
                .iter()
                .map(|d| Line::from(Span::styled(d.as_str(), Style::default().fg(Color::Gray)))),
        );
    }

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_bottom(Line::from(vec![
            Span::styled(" [s]", Style::default().fg(Color::Green)),
            Span::raw(" Sí  "),
            Span::styled("[n]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancelar "),
        ]))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
