//! Expense list view
//!
//! Search box over a table of the matching expenses

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::MainPanelLayout;

/// Render the search box and the table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    render_search(frame, app, layout.search);
    render_table(frame, app, layout.table);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.search_input, inner);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Table;
    let rows = app.visible_rows();
    let symbol = app.settings.currency_symbol.as_str();

    let title = if app.search_input.value().trim().is_empty() {
        format!(" Gastos ({}) ", rows.len())
    } else {
        format!(
            " Gastos ({} de {}) ",
            rows.len(),
            app.storage.store().len()
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));

    if rows.is_empty() {
        let message = if app.storage.store().is_empty() {
            "No hay gastos. Pulse 'n' para agregar uno o 'g' para generar datos."
        } else {
            "Ningún gasto coincide con la búsqueda."
        };
        let text = Paragraph::new(Line::from(message))
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Fecha"),
        Cell::from("Categoría"),
        Cell::from("Descripción"),
        Cell::from("Monto"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|(id, expense)| {
            Row::new(vec![
                Cell::from(id.to_string()),
                Cell::from(expense.date.to_string()),
                Cell::from(expense.category.as_str().to_string()),
                Cell::from(expense.description.clone()),
                Cell::from(
                    Line::from(expense.amount.format_with_symbol(symbol)).right_aligned(),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Min(12),
        Constraint::Length(12),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
