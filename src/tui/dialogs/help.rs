//! Help dialog
//!
//! Shows the keyboard shortcuts of the current view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App, SidebarAction};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Ayuda ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Teclas globales"),
        Line::from(""),
        key_line("?", "Mostrar/ocultar ayuda"),
        key_line("Ctrl+S", "Guardar en el archivo actual"),
        key_line("Tab", "Cambiar panel"),
        key_line("/", "Buscar"),
        key_line("j/k ↑/↓", "Mover selección"),
        Line::from(""),
    ];

    match app.active_view {
        ActiveView::Expenses => {
            lines.push(section("Acciones"));
            lines.push(Line::from(""));
            for action in SidebarAction::ALL {
                lines.push(key_line(&action.key().to_string(), action.label()));
            }
            lines.push(key_line("Enter", "Ejecutar acción / editar gasto"));
        }
        ActiveView::Chart(_) => {
            lines.push(section("Gráfico"));
            lines.push(Line::from(""));
            lines.push(key_line("←/→", "Cambiar tipo de gráfico"));
            lines.push(key_line("e", "Exportar como SVG"));
            lines.push(key_line("Esc", "Volver a la lista"));
        }
    }

    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>10}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::raw(description.to_string()),
    ])
}
