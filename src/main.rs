use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gastos::cli::{
    handle_expense_command, handle_report_command, handle_transfer_command, run_console,
    ExpenseCommands, ReportCommands, TransferCommands,
};
use gastos::config::paths::DEFAULT_DATA_FILE;
use gastos::config::{ExpensePaths, Settings};
use gastos::logging::{init_tracing, LogTarget, LOG_ENV};
use gastos::models::IdScheme;
use gastos::storage::Storage;

#[derive(Parser)]
#[command(
    name = "gastos",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "gastos keeps a list of personal expenses in a JSON file. Run it \
                  without a subcommand for the numbered menu, use 'gastos tui' for \
                  the full-screen interface, or call one of the subcommands below."
)]
struct Cli {
    /// Data file (.json, .csv or .txt)
    #[arg(short, long, global = true, env = "GASTOS_FILE", default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// How new expense ids are assigned
    #[arg(long, global = true, value_enum, env = "GASTOS_ID_SCHEME", default_value = "sequential")]
    ids: IdScheme,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the numbered console menu (default)
    Menu,

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    #[command(flatten)]
    Transfer(TransferCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new(&cli.file);
    let settings = Settings::with_scheme(cli.ids);
    settings.validate()?;

    let log_target = match cli.command {
        Some(Commands::Tui) => LogTarget::File(paths.log_file()),
        _ => LogTarget::Stderr,
    };
    init_tracing(cli.verbose, log_target);

    let mut storage = Storage::open(paths.data_file(), settings.id_scheme)?;

    match cli.command {
        None | Some(Commands::Menu) => {
            run_console(&mut storage, &settings)?;
        }
        Some(Commands::Tui) => {
            gastos::tui::run_tui(&mut storage, &settings)?;
        }
        Some(Commands::Config) => {
            println!("Configuración de gastos");
            println!("=======================");
            println!("Archivo de datos: {}", paths.data_file().display());
            println!("Formato:          {}", storage.format()?);
            println!("Existe:           {}", if storage.file_existed() { "sí" } else { "no" });
            println!("Registro (TUI):   {}", paths.log_file().display());
            println!("Filtro de log:    {}", LOG_ENV);
            println!();
            println!("Ajustes:");
            println!("  Esquema de IDs:      {}", settings.id_scheme);
            println!("  Símbolo de moneda:   {}", settings.currency_symbol);
            println!("  Gastos a generar:    {}", settings.generate_count);
            println!("  Barras histograma:   {}", settings.histogram_bins);
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transfer(cmd)) => {
            handle_transfer_command(&mut storage, cmd)?;
        }
    }

    Ok(())
}
