//! Numbered console menu
//!
//! The classic interactive front end: a main menu loops until the user picks
//! exit (or input ends). Every action returns to the main menu; bad input is
//! reported and re-prompted, never fatal.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::prompt::Prompter;
use crate::config::settings::MAX_GENERATE_COUNT;
use crate::config::{ExpensePaths, Settings};
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryList, ExpenseId};
use crate::reports::{export_svg, render_text, ChartKind, ExpenseSummary};
use crate::services::{
    generate, parse_amount, parse_date, parse_id, CreateExpenseInput, ExpenseService,
    UpdateExpenseInput,
};
use crate::storage::{ExpenseStore, Storage};

/// Width of text chart bars
const TEXT_CHART_WIDTH: usize = 40;

/// Main menu options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Update,
    Delete,
    Save,
    Reload,
    Generate,
    Search,
    Charts,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::Add,
        MenuChoice::List,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Save,
        MenuChoice::Reload,
        MenuChoice::Generate,
        MenuChoice::Search,
        MenuChoice::Charts,
        MenuChoice::Exit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Add => "1",
            Self::List => "2",
            Self::Update => "3",
            Self::Delete => "4",
            Self::Save => "5",
            Self::Reload => "6",
            Self::Generate => "7",
            Self::Search => "8",
            Self::Charts => "9",
            Self::Exit => "0",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "Agregar gasto",
            Self::List => "Listar gastos",
            Self::Update => "Actualizar gasto",
            Self::Delete => "Eliminar gasto",
            Self::Save => "Guardar datos",
            Self::Reload => "Cargar datos",
            Self::Generate => "Generar datos de prueba",
            Self::Search => "Buscar gastos",
            Self::Charts => "Gráficos",
            Self::Exit => "Salir",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|c| c.key() == s)
    }
}

/// Whether the menu keeps running after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Interactive console session over a storage
pub struct Menu<'a, R, W> {
    prompt: Prompter<R, W>,
    storage: &'a mut Storage,
    settings: &'a Settings,
    rng: StdRng,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(prompt: Prompter<R, W>, storage: &'a mut Storage, settings: &'a Settings) -> Self {
        Self {
            prompt,
            storage,
            settings,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed random source for generated data
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Give back the prompter once the session is over
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompt
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> ExpenseResult<()> {
        loop {
            self.prompt.clear()?;
            self.print_menu()?;

            let Some(answer) = self.prompt.ask("Seleccione una opción: ")? else {
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                self.prompt
                    .say(format!("Opción inválida: '{}'. Elija un número del 0 al 9.", answer))?;
                continue;
            };

            tracing::debug!(?choice, "menu choice");
            match self.dispatch(choice) {
                Ok(Step::Exit) => return Ok(()),
                Ok(Step::Continue) => {}
                Err(e) => self.prompt.say(format!("Error: {}", e))?,
            }
            self.prompt.pause()?;
        }
    }

    fn print_menu(&mut self) -> ExpenseResult<()> {
        self.prompt.say("")?;
        self.prompt.say("===== GESTOR DE GASTOS =====")?;
        self.prompt.say(format!(
            "Archivo: {} ({} gasto(s){})",
            self.storage.path().display(),
            self.storage.store().len(),
            if self.storage.is_dirty() { ", sin guardar" } else { "" }
        ))?;
        for choice in MenuChoice::ALL {
            self.prompt
                .say(format!("{}. {}", choice.key(), choice.label()))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> ExpenseResult<Step> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::List => self.list(),
            MenuChoice::Update => self.update(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Save => self.save(),
            MenuChoice::Reload => self.reload(),
            MenuChoice::Generate => self.generate(),
            MenuChoice::Search => self.search(),
            MenuChoice::Charts => self.charts(),
            MenuChoice::Exit => self.exit(),
        }
    }

    fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Number from the list or free text; an out-of-range number means `Otros`
    fn pick_category(&mut self, list: &CategoryList, answer: &str) -> ExpenseResult<Category> {
        match answer.parse::<usize>() {
            Ok(n) if n >= 1 && n <= list.len() => {
                Ok(Category::new(list.get(n - 1).unwrap_or_default()))
            }
            Ok(n) => {
                self.prompt.say(format!(
                    "  Número {} fuera de rango; se usa '{}'.",
                    n,
                    Category::default()
                ))?;
                Ok(Category::default())
            }
            Err(_) => Ok(Category::new(answer)),
        }
    }

    fn add(&mut self) -> ExpenseResult<Step> {
        self.prompt.say("\n--- Nuevo gasto ---")?;

        let categories = self.storage.store().categories();
        for (i, name) in categories.iter().enumerate() {
            self.prompt.say(format!("  {}. {}", i + 1, name))?;
        }
        let Some(answer) = self
            .prompt
            .ask("Categoría (número o nombre, Enter = Otros): ")?
        else {
            return Ok(Step::Exit);
        };
        let category = self.pick_category(&categories, &answer)?;

        let Some(description) = self.prompt.ask("Descripción: ")? else {
            return Ok(Step::Exit);
        };
        let Some(amount) = self.prompt.ask_until("Monto: ", false, parse_amount)? else {
            return Ok(Step::Exit);
        };
        let Some(date) = self
            .prompt
            .ask_until("Fecha (dd/mm/aaaa, Enter = hoy): ", true, parse_date)?
        else {
            return Ok(Step::Exit);
        };

        let input = CreateExpenseInput {
            date: date.map(|d| d.to_string()).unwrap_or_default(),
            category: category.to_string(),
            description,
            amount: amount.map(|m| m.to_plain_string()).unwrap_or_default(),
        };
        let id = ExpenseService::new(self.storage.store_mut()).create(input)?;
        self.prompt.say(format!("Gasto agregado con ID {}.", id))?;
        Ok(Step::Continue)
    }

    fn list(&mut self) -> ExpenseResult<Step> {
        let table = format_expense_table(self.storage.store().iter(), self.symbol());
        self.prompt.print(table)?;
        Ok(Step::Continue)
    }

    /// Ask for an id that exists; `Ok(None)` means back to the menu
    fn ask_existing_id(&mut self, label: &str) -> ExpenseResult<Option<Option<ExpenseId>>> {
        let Some(answer) = self.prompt.ask(label)? else {
            return Ok(None);
        };
        let id = match parse_id(&answer) {
            Ok(id) => id,
            Err(e) => {
                self.prompt.say(e.to_string())?;
                return Ok(Some(None));
            }
        };
        if !self.storage.store().contains(&id) {
            self.prompt
                .say(ExpenseError::expense_not_found(id.to_string()).to_string())?;
            if let Some(hint) = known_ids_hint(self.storage.store()) {
                self.prompt.say(hint)?;
            }
            return Ok(Some(None));
        }
        Ok(Some(Some(id)))
    }

    fn update(&mut self) -> ExpenseResult<Step> {
        let id = match self.ask_existing_id("ID del gasto a actualizar: ")? {
            None => return Ok(Step::Exit),
            Some(None) => return Ok(Step::Continue),
            Some(Some(id)) => id,
        };
        let current = self.storage.store().get(&id)?.clone();
        let details = format_expense_details(&id, &current, self.symbol());
        self.prompt.print(details)?;
        self.prompt
            .say("Deje en blanco para conservar el valor actual.")?;

        let Some(category) = self
            .prompt
            .ask(&format!("Categoría [{}]: ", current.category))?
        else {
            return Ok(Step::Exit);
        };
        let Some(description) = self
            .prompt
            .ask(&format!("Descripción [{}]: ", current.description))?
        else {
            return Ok(Step::Exit);
        };
        let Some(amount) = self.prompt.ask_until(
            &format!("Monto [{}]: ", current.amount.to_plain_string()),
            true,
            parse_amount,
        )?
        else {
            return Ok(Step::Exit);
        };
        let Some(date) =
            self.prompt
                .ask_until(&format!("Fecha [{}]: ", current.date), true, parse_date)?
        else {
            return Ok(Step::Exit);
        };

        let input = UpdateExpenseInput {
            date: date.map(|d| d.to_string()),
            category: Some(category),
            description: Some(description),
            amount: amount.map(|m| m.to_plain_string()),
        };
        ExpenseService::new(self.storage.store_mut()).update(&id, input)?;
        self.prompt.say(format!("Gasto {} actualizado.", id))?;
        Ok(Step::Continue)
    }

    fn delete(&mut self) -> ExpenseResult<Step> {
        let id = match self.ask_existing_id("ID del gasto a eliminar: ")? {
            None => return Ok(Step::Exit),
            Some(None) => return Ok(Step::Continue),
            Some(Some(id)) => id,
        };
        let details = format_expense_details(&id, self.storage.store().get(&id)?, self.symbol());
        self.prompt.print(details)?;

        if self.prompt.confirm("¿Eliminar este gasto?")? {
            ExpenseService::new(self.storage.store_mut()).delete(&id)?;
            self.prompt.say(format!("Gasto {} eliminado.", id))?;
        } else {
            self.prompt.say("Eliminación cancelada.")?;
        }
        Ok(Step::Continue)
    }

    fn save(&mut self) -> ExpenseResult<Step> {
        self.storage.save()?;
        self.prompt.say(format!(
            "{} gasto(s) guardados en {}.",
            self.storage.store().len(),
            self.storage.path().display()
        ))?;
        Ok(Step::Continue)
    }

    fn reload(&mut self) -> ExpenseResult<Step> {
        if self.storage.is_dirty()
            && !self
                .prompt
                .confirm("Hay cambios sin guardar que se perderán. ¿Cargar de todos modos?")?
        {
            self.prompt.say("Carga cancelada.")?;
            return Ok(Step::Continue);
        }

        let report = self.storage.reload()?;
        if !report.existed {
            self.prompt.say(format!(
                "El archivo {} no existe; se empieza sin gastos.",
                self.storage.path().display()
            ))?;
        } else {
            self.prompt
                .say(format!("{} gasto(s) cargados.", report.store.len()))?;
        }
        if report.skipped > 0 {
            self.prompt.say(format!(
                "{} registro(s) inválidos fueron omitidos.",
                report.skipped
            ))?;
        }
        Ok(Step::Continue)
    }

    fn generate(&mut self) -> ExpenseResult<Step> {
        let default = self.settings.generate_count;
        let label = format!(
            "Cantidad de gastos a generar (1-{}, Enter = {}): ",
            MAX_GENERATE_COUNT, default
        );
        let Some(count) = self.prompt.ask_until(&label, true, parse_count)? else {
            return Ok(Step::Exit);
        };
        let count = count.unwrap_or(default);

        let ids = generate(self.storage.store_mut(), count, &mut self.rng)?;
        self.prompt
            .say(format!("Se generaron {} gastos de prueba.", ids.len()))?;
        Ok(Step::Continue)
    }

    fn search(&mut self) -> ExpenseResult<Step> {
        let Some(query) = self.prompt.ask("Texto a buscar (categoría o descripción): ")? else {
            return Ok(Step::Exit);
        };
        let hits = self.storage.store().search(&query);
        let table = format_expense_table(hits, self.symbol());
        self.prompt.print(table)?;
        Ok(Step::Continue)
    }

    fn charts(&mut self) -> ExpenseResult<Step> {
        self.prompt.say("\n--- Gráficos ---")?;
        for (i, kind) in ChartKind::ALL_KINDS.iter().enumerate() {
            self.prompt
                .say(format!("{}. {} ({})", i + 1, kind, kind.title()))?;
        }
        self.prompt.say("0. Volver")?;

        let Some(answer) = self.prompt.ask("Seleccione un gráfico: ")? else {
            return Ok(Step::Exit);
        };
        let kind = match answer.parse::<usize>() {
            Ok(0) => return Ok(Step::Continue),
            Ok(n) if n <= ChartKind::ALL_KINDS.len() => ChartKind::ALL_KINDS[n - 1],
            _ => {
                self.prompt.say(format!("Opción inválida: '{}'.", answer))?;
                return Ok(Step::Continue);
            }
        };

        let summary = ExpenseSummary::generate(self.storage.store());
        let bins = self.settings.histogram_bins;
        self.prompt
            .print(render_text(&summary, kind, bins, TEXT_CHART_WIDTH))?;
        if summary.is_empty() {
            return Ok(Step::Continue);
        }

        if self.prompt.confirm("¿Exportar como SVG?")? {
            let default = ExpensePaths::new(self.storage.path()).chart_file(kind);
            let Some(answer) = self
                .prompt
                .ask(&format!("Archivo [{}]: ", default.display()))?
            else {
                return Ok(Step::Exit);
            };
            let path = if answer.is_empty() {
                default
            } else {
                PathBuf::from(answer)
            };
            export_svg(&summary, kind, bins, &path)?;
            self.prompt
                .say(format!("Gráfico guardado en {}.", path.display()))?;
        }
        Ok(Step::Continue)
    }

    fn exit(&mut self) -> ExpenseResult<Step> {
        if self.storage.is_dirty()
            && self
                .prompt
                .confirm("Hay cambios sin guardar. ¿Guardar antes de salir?")?
        {
            self.save()?;
        }
        self.prompt.say("¡Hasta luego!")?;
        Ok(Step::Exit)
    }
}

/// How many ids the not-found hint lists
const ID_HINT_LIMIT: usize = 10;

/// "IDs disponibles: 1, 2, 3" for the first few ids of the store
fn known_ids_hint(store: &ExpenseStore) -> Option<String> {
    if store.is_empty() {
        return None;
    }
    let shown: Vec<String> = store
        .ids()
        .take(ID_HINT_LIMIT)
        .map(ToString::to_string)
        .collect();
    let more = if store.len() > ID_HINT_LIMIT { ", ..." } else { "" };
    Some(format!("IDs disponibles: {}{}", shown.join(", "), more))
}

fn parse_count(text: &str) -> ExpenseResult<usize> {
    match text.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_GENERATE_COUNT).contains(&n) => Ok(n),
        _ => Err(ExpenseError::Validation(format!(
            "Ingrese un número entre 1 y {}",
            MAX_GENERATE_COUNT
        ))),
    }
}

/// Run the menu on standard input/output
pub fn run_console(storage: &mut Storage, settings: &Settings) -> ExpenseResult<()> {
    use std::io::IsTerminal;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let interactive = stdout.is_terminal() && stdin.is_terminal();
    let prompt = Prompter::new(stdin.lock(), stdout.lock()).with_clear_screen(interactive);

    if storage.last_skipped() > 0 {
        eprintln!(
            "Aviso: {} registro(s) inválidos fueron omitidos al cargar.",
            storage.last_skipped()
        );
    }
    Menu::new(prompt, storage, settings).run()
}
