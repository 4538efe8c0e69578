//! Expense charts
//!
//! Four views over an [`ExpenseSummary`]: total per category (bars), share of
//! the total (pie), amount spread per category (box plot) and the amount
//! distribution (histogram). Each can be exported as SVG or rendered as plain
//! text for the console.

use std::f64::consts::PI;
use std::fmt;
use std::path::Path;

use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;
use tracing::info;

use super::summary::ExpenseSummary;
use crate::error::{ExpenseError, ExpenseResult};

const PANEL_WIDTH: f64 = 600.0;
const PANEL_HEIGHT: f64 = 400.0;
const MARGIN: f64 = 50.0;

const COLORS: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Which chart to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    /// Total per category
    Bar,
    /// Share of the total per category
    Pie,
    /// Amount spread per category
    Box,
    /// Amount distribution
    Histogram,
    /// The four charts in a 2x2 grid
    All,
}

impl ChartKind {
    /// Single charts, in grid order
    pub const SINGLE: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Box,
        ChartKind::Histogram,
    ];

    /// Every choice offered by the menus
    pub const ALL_KINDS: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Box,
        ChartKind::Histogram,
        ChartKind::All,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Bar => "Gasto total por categoría",
            Self::Pie => "Distribución del gasto",
            Self::Box => "Montos por categoría",
            Self::Histogram => "Distribución de montos",
            Self::All => "Resumen de gastos",
        }
    }

    /// Stem used for default export file names
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Bar => "barras",
            Self::Pie => "torta",
            Self::Box => "cajas",
            Self::Histogram => "histograma",
            Self::All => "todos",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => write!(f, "Barras"),
            Self::Pie => write!(f, "Torta"),
            Self::Box => write!(f, "Cajas"),
            Self::Histogram => write!(f, "Histograma"),
            Self::All => write!(f, "Todos"),
        }
    }
}

fn color(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

// Labels are user text; keep markup characters out of the document.
fn label(x: f64, y: f64, content: &str, size: u32, anchor: &str) -> Text {
    let clean: String = content
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '&'))
        .collect();
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-size", size)
        .set("font-family", "sans-serif")
        .set("text-anchor", anchor)
        .add(TextNode::new(clean))
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", 1)
}

fn panel(kind: ChartKind, summary: &ExpenseSummary, bins: usize) -> Group {
    let group = Group::new()
        .add(
            Rectangle::new()
                .set("width", PANEL_WIDTH)
                .set("height", PANEL_HEIGHT)
                .set("fill", "white"),
        )
        .add(label(PANEL_WIDTH / 2.0, 25.0, kind.title(), 16, "middle"));

    match kind {
        ChartKind::Bar => bar_panel(group, summary),
        ChartKind::Pie => pie_panel(group, summary),
        ChartKind::Box => box_panel(group, summary),
        ChartKind::Histogram => histogram_panel(group, summary, bins),
        ChartKind::All => group,
    }
}

fn bar_panel(mut group: Group, summary: &ExpenseSummary) -> Group {
    let plot_height = PANEL_HEIGHT - 2.0 * MARGIN;
    let plot_width = PANEL_WIDTH - 2.0 * MARGIN;
    let base = PANEL_HEIGHT - MARGIN;
    let max = summary
        .categories
        .iter()
        .map(|c| c.total.as_f64())
        .fold(0.0, f64::max);
    let slot = plot_width / summary.categories.len().max(1) as f64;

    for (i, entry) in summary.categories.iter().enumerate() {
        let value = entry.total.as_f64();
        let height = if max > 0.0 { value / max * plot_height } else { 0.0 };
        let x = MARGIN + slot * i as f64;
        group = group
            .add(
                Rectangle::new()
                    .set("x", x + slot * 0.1)
                    .set("y", base - height)
                    .set("width", slot * 0.8)
                    .set("height", height)
                    .set("fill", color(i)),
            )
            .add(label(x + slot / 2.0, base - height - 4.0, &format!("{:.2}", value), 10, "middle"))
            .add(label(x + slot / 2.0, base + 14.0, entry.category.as_str(), 10, "middle"));
    }

    group
        .add(axis(MARGIN, base, PANEL_WIDTH - MARGIN, base))
        .add(axis(MARGIN, MARGIN, MARGIN, base))
}

fn pie_panel(mut group: Group, summary: &ExpenseSummary) -> Group {
    let cx = PANEL_WIDTH * 0.35;
    let cy = PANEL_HEIGHT / 2.0 + 10.0;
    let r = PANEL_HEIGHT / 2.0 - MARGIN;
    let total = summary.total.as_f64();

    let slices: Vec<_> = summary
        .categories
        .iter()
        .filter(|c| c.total.cents() > 0)
        .collect();

    if slices.len() == 1 {
        group = group.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", r)
                .set("fill", color(0)),
        );
    } else if total > 0.0 {
        let mut start = -PI / 2.0;
        for (i, entry) in slices.iter().enumerate() {
            let sweep = entry.total.as_f64() / total * 2.0 * PI;
            let end = start + sweep;
            let large = if sweep > PI { 1 } else { 0 };
            let d = format!(
                "M {cx:.2} {cy:.2} L {:.2} {:.2} A {r:.2} {r:.2} 0 {large} 1 {:.2} {:.2} Z",
                cx + r * start.cos(),
                cy + r * start.sin(),
                cx + r * end.cos(),
                cy + r * end.sin(),
            );
            group = group.add(
                svg::node::element::Path::new()
                    .set("d", d)
                    .set("fill", color(i))
                    .set("stroke", "white"),
            );
            start = end;
        }
    }

    // Legend
    let legend_x = PANEL_WIDTH * 0.68;
    for (i, entry) in slices.iter().enumerate() {
        let y = MARGIN + 10.0 + 20.0 * i as f64;
        group = group
            .add(
                Rectangle::new()
                    .set("x", legend_x)
                    .set("y", y - 10.0)
                    .set("width", 12)
                    .set("height", 12)
                    .set("fill", color(i)),
            )
            .add(label(
                legend_x + 18.0,
                y,
                &format!("{} ({:.1}%)", entry.category, entry.percentage),
                11,
                "start",
            ));
    }
    group
}

fn box_panel(mut group: Group, summary: &ExpenseSummary) -> Group {
    let stats = summary.box_stats_by_category();
    let plot_height = PANEL_HEIGHT - 2.0 * MARGIN;
    let plot_width = PANEL_WIDTH - 2.0 * MARGIN;
    let base = PANEL_HEIGHT - MARGIN;
    let max = stats.iter().map(|(_, s)| s.max).fold(0.0, f64::max);
    let scale = |v: f64| if max > 0.0 { base - v / max * plot_height } else { base };
    let slot = plot_width / stats.len().max(1) as f64;

    for (i, (category, s)) in stats.iter().enumerate() {
        let mid = MARGIN + slot * i as f64 + slot / 2.0;
        let half = slot * 0.3;
        group = group
            .add(axis(mid, scale(s.min), mid, scale(s.q1)))
            .add(axis(mid, scale(s.q3), mid, scale(s.max)))
            .add(axis(mid - half / 2.0, scale(s.min), mid + half / 2.0, scale(s.min)))
            .add(axis(mid - half / 2.0, scale(s.max), mid + half / 2.0, scale(s.max)))
            .add(
                Rectangle::new()
                    .set("x", mid - half)
                    .set("y", scale(s.q3))
                    .set("width", half * 2.0)
                    .set("height", (scale(s.q1) - scale(s.q3)).max(1.0))
                    .set("fill", color(i))
                    .set("stroke", "black"),
            )
            .add(axis(mid - half, scale(s.median), mid + half, scale(s.median)))
            .add(label(mid, base + 14.0, category.as_str(), 10, "middle"));
    }

    group
        .add(axis(MARGIN, base, PANEL_WIDTH - MARGIN, base))
        .add(axis(MARGIN, MARGIN, MARGIN, base))
        .add(label(MARGIN - 4.0, MARGIN + 4.0, &format!("{:.0}", max), 10, "end"))
}

fn histogram_panel(mut group: Group, summary: &ExpenseSummary, bins: usize) -> Group {
    let buckets = summary.histogram(bins);
    let plot_height = PANEL_HEIGHT - 2.0 * MARGIN;
    let plot_width = PANEL_WIDTH - 2.0 * MARGIN;
    let base = PANEL_HEIGHT - MARGIN;
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    let width = plot_width / buckets.len().max(1) as f64;

    for (i, bucket) in buckets.iter().enumerate() {
        let height = if max > 0 {
            bucket.count as f64 / max as f64 * plot_height
        } else {
            0.0
        };
        let x = MARGIN + width * i as f64;
        group = group.add(
            Rectangle::new()
                .set("x", x)
                .set("y", base - height)
                .set("width", width)
                .set("height", height)
                .set("fill", color(0))
                .set("stroke", "white"),
        );
    }

    if let (Some(first), Some(last)) = (buckets.first(), buckets.last()) {
        group = group
            .add(label(MARGIN, base + 14.0, &format!("{:.0}", first.start), 10, "middle"))
            .add(label(
                PANEL_WIDTH - MARGIN,
                base + 14.0,
                &format!("{:.0}", last.end),
                10,
                "middle",
            ))
            .add(label(MARGIN - 4.0, MARGIN + 4.0, &max.to_string(), 10, "end"));
    }

    group
        .add(axis(MARGIN, base, PANEL_WIDTH - MARGIN, base))
        .add(axis(MARGIN, MARGIN, MARGIN, base))
}

/// Build the SVG document for a chart
pub fn render_svg(summary: &ExpenseSummary, kind: ChartKind, bins: usize) -> Document {
    match kind {
        ChartKind::All => {
            let document = ChartKind::SINGLE
                .iter()
                .enumerate()
                .fold(Document::new(), |doc, (i, single)| {
                    let x = (i % 2) as f64 * PANEL_WIDTH;
                    let y = (i / 2) as f64 * PANEL_HEIGHT;
                    doc.add(
                        panel(*single, summary, bins)
                            .set("transform", format!("translate({},{})", x, y)),
                    )
                });
            document.set("viewBox", (0.0, 0.0, PANEL_WIDTH * 2.0, PANEL_HEIGHT * 2.0))
        }
        single => Document::new()
            .add(panel(single, summary, bins))
            .set("viewBox", (0.0, 0.0, PANEL_WIDTH, PANEL_HEIGHT)),
    }
}

/// Write a chart as an SVG file
pub fn export_svg(
    summary: &ExpenseSummary,
    kind: ChartKind,
    bins: usize,
    path: &Path,
) -> ExpenseResult<()> {
    if summary.is_empty() {
        return Err(ExpenseError::Chart("No expenses to chart".into()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let document = render_svg(summary, kind, bins);
    svg::save(path, &document)
        .map_err(|e| ExpenseError::Chart(format!("Failed to write {}: {}", path.display(), e)))?;
    info!(path = %path.display(), chart = %kind, "exported chart");
    Ok(())
}

fn text_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round() as usize
    } else {
        0
    };
    "█".repeat(filled.min(width))
}

/// Plain-text rendering of a chart for the console
pub fn render_text(summary: &ExpenseSummary, kind: ChartKind, bins: usize, width: usize) -> String {
    let mut output = String::new();
    if summary.is_empty() {
        output.push_str("No hay gastos para graficar.\n");
        return output;
    }

    if kind == ChartKind::All {
        for single in ChartKind::SINGLE {
            output.push_str(&render_text(summary, single, bins, width));
            output.push('\n');
        }
        return output;
    }

    output.push_str(kind.title());
    output.push('\n');
    output.push_str(&"-".repeat(kind.title().chars().count()));
    output.push('\n');

    let name_width = summary
        .categories
        .iter()
        .map(|c| c.category.as_str().chars().count())
        .max()
        .unwrap_or(0);

    match kind {
        ChartKind::Bar => {
            let max = summary
                .categories
                .iter()
                .map(|c| c.total.as_f64())
                .fold(0.0, f64::max);
            for entry in &summary.categories {
                output.push_str(&format!(
                    "{:<name_width$} {} {:.2}\n",
                    entry.category.as_str(),
                    text_bar(entry.total.as_f64(), max, width),
                    entry.total.as_f64(),
                ));
            }
        }
        ChartKind::Pie => {
            for entry in &summary.categories {
                output.push_str(&format!(
                    "{:<name_width$} {} {:.1}%\n",
                    entry.category.as_str(),
                    text_bar(entry.percentage, 100.0, width),
                    entry.percentage,
                ));
            }
        }
        ChartKind::Box => {
            output.push_str(&format!(
                "{:<name_width$} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
                "", "mín", "q1", "mediana", "q3", "máx"
            ));
            for (category, s) in summary.box_stats_by_category() {
                output.push_str(&format!(
                    "{:<name_width$} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
                    category.as_str(),
                    s.min,
                    s.q1,
                    s.median,
                    s.q3,
                    s.max,
                ));
            }
        }
        ChartKind::Histogram => {
            let buckets = summary.histogram(bins);
            let max = buckets.iter().map(|b| b.count).max().unwrap_or(0) as f64;
            for bucket in buckets {
                output.push_str(&format!(
                    "{:>9.2} - {:>9.2} {} {}\n",
                    bucket.start,
                    bucket.end,
                    text_bar(bucket.count as f64, max, width),
                    bucket.count,
                ));
            }
        }
        ChartKind::All => {}
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, ExpenseDate, IdScheme, Money};
    use crate::storage::ExpenseStore;
    use tempfile::TempDir;

    fn summary() -> ExpenseSummary {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        for (category, cents) in [("Comida", 1000), ("Transporte", 3000), ("Comida", 2000)] {
            store.insert(Expense::new(
                Category::new(category),
                Money::from_cents(cents),
                ExpenseDate::from_ymd(2024, 1, 1).unwrap(),
                "",
            ));
        }
        ExpenseSummary::generate(&store)
    }

    #[test]
    fn test_render_svg_every_kind() {
        let summary = summary();
        for kind in ChartKind::ALL_KINDS {
            let svg = render_svg(&summary, kind, 12).to_string();
            assert!(svg.contains("<svg"), "{}", kind);
            assert!(svg.contains(kind.title()) || kind == ChartKind::All);
        }
    }

    #[test]
    fn test_export_svg_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("charts").join("grafico.svg");
        export_svg(&summary(), ChartKind::Pie, 12, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Comida"));
    }

    #[test]
    fn test_export_empty_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let empty = ExpenseSummary::generate(&ExpenseStore::default());
        let err = export_svg(&empty, ChartKind::Bar, 12, &temp_dir.path().join("x.svg"));
        assert!(matches!(err, Err(ExpenseError::Chart(_))));
    }

    #[test]
    fn test_render_text() {
        let summary = summary();
        let bar = render_text(&summary, ChartKind::Bar, 12, 20);
        assert!(bar.contains("Comida"));
        assert!(bar.contains("30.00"));

        let pie = render_text(&summary, ChartKind::Pie, 12, 20);
        assert!(pie.contains("50.0%"));

        let all = render_text(&summary, ChartKind::All, 12, 20);
        for kind in ChartKind::SINGLE {
            assert!(all.contains(kind.title()));
        }
    }
}
