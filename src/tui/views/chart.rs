//! Chart view
//!
//! Draws the summary with ratatui widgets. The same data exports to SVG
//! with `e`.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::reports::{ChartKind, ExpenseSummary};
use crate::tui::app::App;
use crate::tui::layout::grid_2x2;

/// Colors cycled over categories
const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightYellow,
];

/// Render the chart view
pub fn render(frame: &mut Frame, app: &App, kind: ChartKind, area: Rect) {
    let summary = ExpenseSummary::generate(app.storage.store());
    let bins = app.settings.histogram_bins;

    let outer = Block::default()
        .title(format!(" {} ", kind.title()))
        .title_bottom(" [←→] Cambiar  [e] Exportar SVG  [Esc] Volver ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if summary.is_empty() {
        frame.render_widget(
            Paragraph::new("No hay gastos para graficar.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    match kind {
        ChartKind::All => {
            for (cell, single) in grid_2x2(inner).into_iter().zip(ChartKind::SINGLE) {
                let block = Block::default()
                    .title(format!(" {} ", single.title()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray));
                let cell_inner = block.inner(cell);
                frame.render_widget(block, cell);
                render_single(frame, &summary, single, bins, cell_inner);
            }
        }
        single => render_single(frame, &summary, single, bins, inner),
    }
}

fn render_single(
    frame: &mut Frame,
    summary: &ExpenseSummary,
    kind: ChartKind,
    bins: usize,
    area: Rect,
) {
    match kind {
        ChartKind::Bar => render_bars(frame, summary, area),
        ChartKind::Pie => render_shares(frame, summary, area),
        ChartKind::Box => render_box_table(frame, summary, area),
        ChartKind::Histogram => render_histogram(frame, summary, bins, area),
        ChartKind::All => {}
    }
}

/// Total per category as vertical bars
fn render_bars(frame: &mut Frame, summary: &ExpenseSummary, area: Rect) {
    let bars: Vec<Bar> = summary
        .categories
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::default()
                .value(entry.total.units().max(0) as u64)
                .label(Line::from(short_label(entry.category.as_str(), 8)))
                .text_value(format!("{:.0}", entry.total.as_f64()))
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(Color::White));

    frame.render_widget(chart, area);
}

/// Share of the total per category, one gauge per line
fn render_shares(frame: &mut Frame, summary: &ExpenseSummary, area: Rect) {
    let rows = summary.categories.len().min(area.height as usize);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            std::iter::repeat(Constraint::Length(1))
                .take(rows)
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (i, entry) in summary.categories.iter().take(rows).enumerate() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(PALETTE[i % PALETTE.len()]))
            .ratio((entry.percentage / 100.0).clamp(0.0, 1.0))
            .label(Span::raw(format!(
                "{} {:.1}%",
                entry.category.as_str(),
                entry.percentage
            )));
        frame.render_widget(gauge, chunks[i]);
    }
}

/// Five-number summary per category
fn render_box_table(frame: &mut Frame, summary: &ExpenseSummary, area: Rect) {
    let header = Row::new(vec!["Categoría", "mín", "q1", "mediana", "q3", "máx"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = summary
        .box_stats_by_category()
        .into_iter()
        .map(|(category, s)| {
            Row::new(vec![
                Cell::from(category.as_str().to_string()),
                Cell::from(format!("{:.2}", s.min)),
                Cell::from(format!("{:.2}", s.q1)),
                Cell::from(format!("{:.2}", s.median)),
                Cell::from(format!("{:.2}", s.q3)),
                Cell::from(format!("{:.2}", s.max)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
    ];

    frame.render_widget(Table::new(rows, widths).header(header), area);
}

/// Amount distribution
fn render_histogram(frame: &mut Frame, summary: &ExpenseSummary, bins: usize, area: Rect) {
    let bars: Vec<Bar> = summary
        .histogram(bins)
        .iter()
        .map(|bucket| {
            Bar::default()
                .value(bucket.count as u64)
                .label(Line::from(format!("{:.0}", bucket.start)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}

fn short_label(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}
