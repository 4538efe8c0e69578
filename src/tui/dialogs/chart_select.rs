//! Chart picker

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::reports::ChartKind;
use crate::tui::layout::centered_rect_fixed;

/// Render the chart picker with `selected` highlighted
pub fn render(frame: &mut Frame, selected: usize) {
    let height = ChartKind::ALL_KINDS.len() as u16 + 4;
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = ChartKind::ALL_KINDS
        .iter()
        .map(|kind| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", kind.to_string()), Style::default().fg(Color::White)),
                Span::styled(kind.title(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Gráficos ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .title_bottom(" [Enter] Ver  [Esc] Cancelar ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
