//! Reports module for gastos
//!
//! Read-only aggregation over the expense store and the charts built from it.

pub mod chart;
pub mod summary;

pub use chart::{export_svg, render_svg, render_text, ChartKind};
pub use summary::{BoxStats, CategoryTotal, ExpenseSummary, HistogramBin};
