//! CLI commands for reports
//!
//! Charts (SVG export or text) and the category summary.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::reports::{export_svg, render_text, ChartKind, ExpenseSummary};
use crate::storage::Storage;

/// Width of text chart bars
const TEXT_WIDTH: usize = 50;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Draw a chart of the expenses
    #[command(alias = "plot")]
    Chart {
        /// Chart kind
        #[arg(value_enum, default_value = "all")]
        kind: ChartKind,

        /// SVG output file (default: grafico_<kind>.svg next to the data file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a text chart instead of writing SVG
        #[arg(long, conflicts_with = "output")]
        text: bool,
    },

    /// Totals per category
    Summary,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let summary = ExpenseSummary::generate(storage.store());

    match cmd {
        ReportCommands::Chart { kind, output, text } => {
            if text {
                print!(
                    "{}",
                    render_text(&summary, kind, settings.histogram_bins, TEXT_WIDTH)
                );
                return Ok(());
            }

            let path = output
                .unwrap_or_else(|| ExpensePaths::new(storage.path()).chart_file(kind));
            export_svg(&summary, kind, settings.histogram_bins, &path)?;
            println!("Gráfico guardado en {}", path.display());
        }

        ReportCommands::Summary => {
            if summary.is_empty() {
                println!("No hay gastos registrados.");
            } else {
                print!("{}", summary.format_terminal(&settings.currency_symbol));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, ExpenseDate, IdScheme, Money};
    use tempfile::TempDir;

    fn storage_with_data(temp_dir: &TempDir) -> Storage {
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        for (category, cents) in [("Comida", 1500), ("Salud", 4200), ("Comida", 800)] {
            storage.store_mut().insert(Expense::new(
                Category::new(category),
                Money::from_cents(cents),
                ExpenseDate::from_ymd(2024, 6, 1).unwrap(),
                "",
            ));
        }
        storage
    }

    #[test]
    fn test_chart_default_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with_data(&temp_dir);

        handle_report_command(
            &storage,
            &Settings::default(),
            ReportCommands::Chart {
                kind: ChartKind::Pie,
                output: None,
                text: false,
            },
        )
        .unwrap();

        assert!(temp_dir.path().join("grafico_torta.svg").exists());
    }

    #[test]
    fn test_chart_explicit_output() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with_data(&temp_dir);
        let output = temp_dir.path().join("charts").join("todo.svg");

        handle_report_command(
            &storage,
            &Settings::default(),
            ReportCommands::Chart {
                kind: ChartKind::All,
                output: Some(output.clone()),
                text: false,
            },
        )
        .unwrap();

        let svg = std::fs::read_to_string(output).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_chart_of_empty_store_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);

        let result = handle_report_command(
            &storage,
            &Settings::default(),
            ReportCommands::Chart {
                kind: ChartKind::Bar,
                output: None,
                text: false,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_and_text_chart_do_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with_data(&temp_dir);
        let settings = Settings::default();

        handle_report_command(&storage, &settings, ReportCommands::Summary).unwrap();
        handle_report_command(
            &storage,
            &settings,
            ReportCommands::Chart {
                kind: ChartKind::Histogram,
                output: None,
                text: true,
            },
        )
        .unwrap();

        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
