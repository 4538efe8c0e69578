//! Sidebar view
//!
//! Shows the action list and the totals of the store

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::app::{App, FocusedPanel, SidebarAction};
use crate::tui::layout::SidebarLayout;

/// Render the sidebar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = SidebarLayout::new(area);

    render_header(frame, layout.header);
    render_actions(frame, app, layout.actions);
    render_totals(frame, app, layout.totals);
}

/// Render sidebar header
fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Gastos ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let version = Paragraph::new(concat!("v", env!("CARGO_PKG_VERSION")))
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(version, area);
}

/// Render the action list
fn render_actions(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Sidebar;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Acciones ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let items: Vec<ListItem> = SidebarAction::ALL
        .iter()
        .map(|action| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", action.key()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(action.label(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let mut list = List::new(items).block(block);
    if is_focused {
        list = list
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
    }

    let mut state = ListState::default();
    state.select(Some(app.sidebar_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render count and total of the store
fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Totales ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let store = app.storage.store();
    let total: crate::models::Money = store.iter().map(|(_, e)| e.amount).sum();

    let lines = vec![
        Line::from(vec![
            Span::styled("Gastos: ", Style::default().fg(Color::White)),
            Span::styled(store.len().to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Total:  ", Style::default().fg(Color::White)),
            Span::styled(
                total.format_with_symbol(&app.settings.currency_symbol),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
