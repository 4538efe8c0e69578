//! Expense CLI commands
//!
//! One-shot commands over the data file. Commands that change the store save
//! it before returning.

use clap::Subcommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::ExpenseResult;
use crate::services::{
    generate, parse_id, CreateExpenseInput, ExpenseService, UpdateExpenseInput,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount (e.g. "15.50" or "15,50")
        amount: String,
        /// Category name (default: Otros)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (dd/mm/yyyy, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// List all expenses
    #[command(alias = "ls")]
    List,

    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Change fields of an expense
    #[command(alias = "edit")]
    Update {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (dd/mm/yyyy)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
        /// Delete without asking
        #[arg(long)]
        force: bool,
    },

    /// Find expenses whose category or description contains the text
    Search {
        /// Text to look for (case-insensitive)
        query: String,
    },

    /// Add random test expenses
    Generate {
        /// How many (1-1000, default 100)
        count: Option<usize>,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl ExpenseCommands {
    /// Whether the command changes the store
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Update { .. }
                | Self::Delete { force: true, .. }
                | Self::Generate { .. }
        )
    }
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let mutating = cmd.is_mutating();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let input = CreateExpenseInput {
                date: date.unwrap_or_default(),
                category: category.unwrap_or_default(),
                description: description.unwrap_or_default(),
                amount,
            };
            let mut service = ExpenseService::new(storage.store_mut());
            let id = service.create(input)?;
            let expense = service.get(&id)?;
            println!("Gasto agregado: {}", expense);
            println!("  ID: {}", id);
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_table(storage.store().iter(), symbol));
        }

        ExpenseCommands::Show { id } => {
            let id = parse_id(&id)?;
            let expense = storage.store().get(&id)?;
            print!("{}", format_expense_details(&id, expense, symbol));
        }

        ExpenseCommands::Update {
            id,
            amount,
            category,
            date,
            description,
        } => {
            let id = parse_id(&id)?;
            let input = UpdateExpenseInput {
                date,
                category,
                description,
                amount,
            };
            if input.to_patch()?.is_empty() {
                // The store must still know the id
                storage.store().get(&id)?;
                println!(
                    "No se especificaron cambios. Use --amount, --category, --date o --description."
                );
                return Ok(());
            }
            let mut service = ExpenseService::new(storage.store_mut());
            let updated = service.update(&id, input)?;
            println!("Gasto {} actualizado: {}", id, updated);
        }

        ExpenseCommands::Delete { id, force } => {
            let id = parse_id(&id)?;
            let expense = storage.store().get(&id)?;
            if !force {
                print!("{}", format_expense_details(&id, expense, symbol));
                println!("Use --force para eliminar este gasto.");
                return Ok(());
            }
            let removed = ExpenseService::new(storage.store_mut()).delete(&id)?;
            println!("Gasto eliminado: {}", removed);
        }

        ExpenseCommands::Search { query } => {
            let hits = storage.store().search(&query);
            print!("{}", format_expense_table(hits, symbol));
        }

        ExpenseCommands::Generate { count, seed } => {
            let count = count.unwrap_or(settings.generate_count);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let ids = generate(storage.store_mut(), count, &mut rng)?;
            println!("Se generaron {} gastos de prueba.", ids.len());
        }
    }

    if mutating {
        storage.save()?;
        tracing::info!(path = %storage.path().display(), "saved after command");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, IdScheme};
    use tempfile::TempDir;

    fn storage(temp_dir: &TempDir) -> Storage {
        Storage::open(temp_dir.path().join("gastos.json"), IdScheme::Sequential).unwrap()
    }

    fn add(storage: &mut Storage, amount: &str, category: &str) {
        handle_expense_command(
            storage,
            &Settings::default(),
            ExpenseCommands::Add {
                amount: amount.into(),
                category: Some(category.into()),
                date: Some("01/02/2024".into()),
                description: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_add_saves_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        add(&mut storage, "12.5", "Comida");

        assert!(!storage.is_dirty());
        let reopened = Storage::open(storage.path(), IdScheme::Sequential).unwrap();
        assert_eq!(reopened.store().len(), 1);
        assert_eq!(
            reopened.store().get(&ExpenseId::Seq(1)).unwrap().amount.cents(),
            1250
        );
    }

    #[test]
    fn test_add_rejects_bad_amount() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let err = handle_expense_command(
            &mut storage,
            &Settings::default(),
            ExpenseCommands::Add {
                amount: "abc".into(),
                category: None,
                date: None,
                description: None,
            },
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_delete_needs_force() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        add(&mut storage, "3", "Transporte");

        let settings = Settings::default();
        handle_expense_command(
            &mut storage,
            &settings,
            ExpenseCommands::Delete {
                id: "1".into(),
                force: false,
            },
        )
        .unwrap();
        assert_eq!(storage.store().len(), 1);

        handle_expense_command(
            &mut storage,
            &settings,
            ExpenseCommands::Delete {
                id: "1".into(),
                force: true,
            },
        )
        .unwrap();
        assert!(storage.store().is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        let err = handle_expense_command(
            &mut storage,
            &Settings::default(),
            ExpenseCommands::Update {
                id: "4".into(),
                amount: Some("10".into()),
                category: None,
                date: None,
                description: None,
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_generate_with_seed() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = storage(&temp_dir);
        handle_expense_command(
            &mut storage,
            &Settings::default(),
            ExpenseCommands::Generate {
                count: Some(25),
                seed: Some(1),
            },
        )
        .unwrap();
        assert_eq!(storage.store().len(), 25);
        assert!(storage.path().exists());
    }

    #[test]
    fn test_is_mutating() {
        assert!(!ExpenseCommands::List.is_mutating());
        assert!(!ExpenseCommands::Delete {
            id: "1".into(),
            force: false
        }
        .is_mutating());
        assert!(ExpenseCommands::Generate {
            count: None,
            seed: None
        }
        .is_mutating());
    }
}
