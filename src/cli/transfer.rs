//! CLI commands for moving data between files
//!
//! `export` writes a copy of the store in any supported format; `import`
//! appends the records of another file with fresh ids.

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::ExpenseResult;
use crate::storage::{FileFormat, Storage};

/// Import/export subcommands
#[derive(Subcommand, Debug)]
pub enum TransferCommands {
    /// Write all expenses to another file
    Export {
        /// Output file path
        output: PathBuf,

        /// Output format (default: from the file extension)
        #[arg(long, value_enum)]
        format: Option<FileFormat>,
    },

    /// Append the expenses of a JSON, CSV or TXT file
    Import {
        /// File to read
        path: PathBuf,
    },
}

/// Handle an import/export command
pub fn handle_transfer_command(storage: &mut Storage, cmd: TransferCommands) -> ExpenseResult<()> {
    match cmd {
        TransferCommands::Export { output, format } => {
            let format = match format {
                Some(format) => format,
                None => FileFormat::from_path(&output)?,
            };
            storage.export(&output, format)?;
            println!(
                "{} gasto(s) exportados a {} ({})",
                storage.store().len(),
                output.display(),
                format
            );
        }

        TransferCommands::Import { path } => {
            let report = storage.import(&path)?;
            storage.save()?;
            println!(
                "{} gasto(s) importados desde {}",
                report.added.len(),
                path.display()
            );
            if report.skipped > 0 {
                println!("{} registro(s) inválidos fueron omitidos.", report.skipped);
            }
        }
    }

    Ok(())
}
