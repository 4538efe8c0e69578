//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events,
//! and performs the actions the sidebar and dialogs trigger. Failures are
//! shown in the status bar or inside the open dialog; they never end the UI.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::settings::MAX_GENERATE_COUNT;
use crate::config::{ExpensePaths, Settings};
use crate::models::{Expense, ExpenseId};
use crate::reports::{export_svg, ChartKind, ExpenseSummary};
use crate::services::{generate, ExpenseService};
use crate::storage::Storage;

use super::dialogs::expense::ExpenseFormState;
use super::dialogs::save::SaveFormState;
use super::widgets::TextInput;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Expenses,
    Chart(ChartKind),
}

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Sidebar,
    Table,
    Search,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    /// New expense (`None`) or edit of an existing one
    ExpenseForm(Option<ExpenseId>),
    ConfirmDelete(ExpenseId),
    Generate,
    ChartSelect,
    SaveFormat,
    Import,
    ConfirmQuit,
    Help,
}

/// Entries of the sidebar, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    Import,
    Save,
    Create,
    Edit,
    Delete,
    Generate,
    Charts,
    Quit,
}

impl SidebarAction {
    pub const ALL: [SidebarAction; 8] = [
        SidebarAction::Import,
        SidebarAction::Save,
        SidebarAction::Create,
        SidebarAction::Edit,
        SidebarAction::Delete,
        SidebarAction::Generate,
        SidebarAction::Charts,
        SidebarAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Import => "Importar",
            Self::Save => "Guardar / Exportar",
            Self::Create => "Nuevo gasto",
            Self::Edit => "Editar gasto",
            Self::Delete => "Eliminar gasto",
            Self::Generate => "Generar datos",
            Self::Charts => "Gráficos",
            Self::Quit => "Salir",
        }
    }

    /// Shortcut key on the main screen
    pub fn key(&self) -> char {
        match self {
            Self::Import => 'i',
            Self::Save => 's',
            Self::Create => 'n',
            Self::Edit => 'e',
            Self::Delete => 'd',
            Self::Generate => 'g',
            Self::Charts => 'c',
            Self::Quit => 'q',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == c)
    }
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a mut Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Which panel is focused
    pub focused_panel: FocusedPanel,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Highlighted sidebar entry
    pub sidebar_index: usize,

    /// Selected row among the visible (filtered) expenses
    pub selected_index: usize,

    /// Search-as-you-type filter
    pub search_input: TextInput,

    /// Status message to display
    pub status_message: Option<String>,

    /// Whether the status message reports a failure
    pub status_is_error: bool,

    pub expense_form: ExpenseFormState,
    pub save_form: SaveFormState,
    pub generate_input: TextInput,
    pub import_input: TextInput,

    /// Error shown inside the generate/import dialogs
    pub dialog_error: Option<String>,

    /// Highlighted entry of the chart picker
    pub chart_select_index: usize,

    rng: StdRng,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a mut Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            focused_panel: FocusedPanel::default(),
            active_dialog: ActiveDialog::default(),
            sidebar_index: 0,
            selected_index: 0,
            search_input: TextInput::new()
                .label("Buscar")
                .placeholder("categoría o descripción (/)"),
            status_message: None,
            status_is_error: false,
            expense_form: ExpenseFormState::default(),
            save_form: SaveFormState::default(),
            generate_input: TextInput::new().label("Cantidad"),
            import_input: TextInput::new().label("Archivo"),
            dialog_error: None,
            chart_select_index: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed random source for generated data
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Quit, asking first when there are unsaved changes
    pub fn request_quit(&mut self) {
        if self.storage.is_dirty() {
            self.open_dialog(ActiveDialog::ConfirmQuit);
        } else {
            self.quit();
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    /// Set an error message in the status bar
    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "tui error");
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    /// Expenses matching the search box, in store order
    pub fn visible_rows(&self) -> Vec<(&ExpenseId, &Expense)> {
        self.storage.store().search(self.search_input.value())
    }

    /// Id of the selected row, if any
    pub fn selected_id(&self) -> Option<ExpenseId> {
        self.visible_rows()
            .get(self.selected_index)
            .map(|(id, _)| (*id).clone())
    }

    /// Keep the selection inside the visible rows
    pub fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// The search text changed
    pub fn search_changed(&mut self) {
        self.selected_index = 0;
    }

    /// Toggle focus between sidebar and table
    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Table,
            FocusedPanel::Table | FocusedPanel::Search => FocusedPanel::Sidebar,
        };
        self.search_input.focused = false;
    }

    /// Put the cursor in the search box
    pub fn focus_search(&mut self) {
        self.focused_panel = FocusedPanel::Search;
        self.search_input.focused = true;
    }

    /// Leave the search box, keeping the filter
    pub fn leave_search(&mut self) {
        self.focused_panel = FocusedPanel::Table;
        self.search_input.focused = false;
    }

    /// Move selection up in the focused panel
    pub fn move_up(&mut self) {
        match self.focused_panel {
            FocusedPanel::Sidebar => {
                self.sidebar_index = self.sidebar_index.saturating_sub(1);
            }
            FocusedPanel::Table | FocusedPanel::Search => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the focused panel
    pub fn move_down(&mut self) {
        match self.focused_panel {
            FocusedPanel::Sidebar => {
                if self.sidebar_index + 1 < SidebarAction::ALL.len() {
                    self.sidebar_index += 1;
                }
            }
            FocusedPanel::Table | FocusedPanel::Search => {
                if self.selected_index + 1 < self.visible_rows().len() {
                    self.selected_index += 1;
                }
            }
        }
    }

    /// Highlighted sidebar action
    pub fn sidebar_action(&self) -> SidebarAction {
        SidebarAction::ALL[self.sidebar_index.min(SidebarAction::ALL.len() - 1)]
    }

    /// Run a sidebar action
    pub fn run_action(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::Import => self.open_dialog(ActiveDialog::Import),
            SidebarAction::Save => self.open_dialog(ActiveDialog::SaveFormat),
            SidebarAction::Create => self.open_dialog(ActiveDialog::ExpenseForm(None)),
            SidebarAction::Edit => match self.selected_id() {
                Some(id) => self.open_dialog(ActiveDialog::ExpenseForm(Some(id))),
                None => self.set_error("Seleccione un gasto para editar"),
            },
            SidebarAction::Delete => match self.selected_id() {
                Some(id) => self.open_dialog(ActiveDialog::ConfirmDelete(id)),
                None => self.set_error("Seleccione un gasto para eliminar"),
            },
            SidebarAction::Generate => self.open_dialog(ActiveDialog::Generate),
            SidebarAction::Charts => self.open_dialog(ActiveDialog::ChartSelect),
            SidebarAction::Quit => self.request_quit(),
        }
    }

    /// Open a dialog, preparing its state
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.dialog_error = None;
        match &dialog {
            ActiveDialog::ExpenseForm(None) => {
                self.expense_form = ExpenseFormState::new(&self.storage.store().categories());
            }
            ActiveDialog::ExpenseForm(Some(id)) => {
                let categories = self.storage.store().categories();
                match self.storage.store().get(id) {
                    Ok(expense) => {
                        self.expense_form = ExpenseFormState::from_expense(expense, &categories);
                    }
                    Err(e) => {
                        self.set_error(e.to_string());
                        return;
                    }
                }
            }
            ActiveDialog::Generate => {
                self.generate_input = TextInput::new()
                    .label("Cantidad")
                    .content(self.settings.generate_count.to_string())
                    .focused(true);
            }
            ActiveDialog::ChartSelect => {
                self.chart_select_index = 0;
            }
            ActiveDialog::SaveFormat => {
                self.save_form = SaveFormState::new(self.storage.path());
            }
            ActiveDialog::Import => {
                self.import_input = TextInput::new()
                    .label("Archivo")
                    .placeholder("ruta a .json, .csv o .txt")
                    .focused(true);
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.dialog_error = None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Create or update from the expense form
    pub fn submit_expense_form(&mut self) {
        let ActiveDialog::ExpenseForm(target) = self.active_dialog.clone() else {
            return;
        };

        let mut service = ExpenseService::new(self.storage.store_mut());
        let result = match &target {
            None => service
                .create(self.expense_form.create_input())
                .map(|id| format!("Gasto {} agregado", id)),
            Some(id) => service
                .update(id, self.expense_form.update_input())
                .map(|_| format!("Gasto {} actualizado", id)),
        };

        match result {
            Ok(message) => {
                self.close_dialog();
                self.set_status(message);
                if target.is_none() {
                    // Show the new row
                    self.selected_index = self.visible_rows().len().saturating_sub(1);
                }
                self.clamp_selection();
            }
            Err(e) => self.expense_form.set_error(e.to_string()),
        }
    }

    /// Delete the expense awaiting confirmation
    pub fn confirm_delete(&mut self) {
        let ActiveDialog::ConfirmDelete(id) = self.active_dialog.clone() else {
            return;
        };
        self.close_dialog();
        match ExpenseService::new(self.storage.store_mut()).delete(&id) {
            Ok(_) => {
                self.set_status(format!("Gasto {} eliminado", id));
                self.clamp_selection();
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Generate the number of expenses typed in the dialog
    pub fn submit_generate(&mut self) {
        let count = match self.generate_input.value().trim().parse::<usize>() {
            Ok(n) if (1..=MAX_GENERATE_COUNT).contains(&n) => n,
            _ => {
                self.dialog_error = Some(format!(
                    "Ingrese un número entre 1 y {}",
                    MAX_GENERATE_COUNT
                ));
                return;
            }
        };

        match generate(self.storage.store_mut(), count, &mut self.rng) {
            Ok(ids) => {
                self.close_dialog();
                self.set_status(format!("Se generaron {} gastos de prueba", ids.len()));
            }
            Err(e) => self.dialog_error = Some(e.to_string()),
        }
    }

    /// Append the file typed in the import dialog
    pub fn submit_import(&mut self) {
        let value = self.import_input.value().trim().to_string();
        if value.is_empty() {
            self.dialog_error = Some("Ingrese la ruta del archivo".into());
            return;
        }

        match self.storage.import(std::path::Path::new(&value)) {
            Ok(report) => {
                self.close_dialog();
                let mut message = format!("{} gasto(s) importados", report.added.len());
                if report.skipped > 0 {
                    message.push_str(&format!(", {} omitidos", report.skipped));
                }
                self.set_status(message);
            }
            Err(e) => self.dialog_error = Some(e.to_string()),
        }
    }

    /// Save with the format and destination chosen in the dialog
    ///
    /// The destination becomes the current file.
    pub fn submit_save(&mut self) {
        let Some(path) = self.save_form.destination() else {
            self.save_form.set_error("Ingrese la ruta del archivo");
            return;
        };
        let format = self.save_form.format;

        match self.storage.save_as(&path, format) {
            Ok(()) => {
                self.close_dialog();
                self.set_status(format!(
                    "{} gasto(s) guardados en {} ({})",
                    self.storage.store().len(),
                    path.display(),
                    format
                ));
            }
            Err(e) => self.save_form.set_error(e.to_string()),
        }
    }

    /// Save to the current file
    pub fn save(&mut self) -> bool {
        match self.storage.save() {
            Ok(()) => {
                self.set_status(format!(
                    "Guardado en {}",
                    self.storage.path().display()
                ));
                true
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    /// Show the chart highlighted in the picker
    pub fn select_chart(&mut self) {
        let index = self.chart_select_index.min(ChartKind::ALL_KINDS.len() - 1);
        self.close_dialog();
        self.show_chart(ChartKind::ALL_KINDS[index]);
    }

    /// Switch to the chart view
    pub fn show_chart(&mut self, kind: ChartKind) {
        if self.storage.store().is_empty() {
            self.set_error("No hay gastos para graficar");
            return;
        }
        self.active_view = ActiveView::Chart(kind);
    }

    /// Move to the next (or previous) chart kind
    pub fn cycle_chart(&mut self, forward: bool) {
        let ActiveView::Chart(kind) = self.active_view else {
            return;
        };
        let kinds = ChartKind::ALL_KINDS;
        let index = kinds.iter().position(|k| *k == kind).unwrap_or(0);
        let next = if forward {
            (index + 1) % kinds.len()
        } else {
            (index + kinds.len() - 1) % kinds.len()
        };
        self.active_view = ActiveView::Chart(kinds[next]);
    }

    /// Back to the table
    pub fn close_chart(&mut self) {
        self.active_view = ActiveView::Expenses;
    }

    /// Export the chart on screen next to the data file
    pub fn export_chart(&mut self) {
        let ActiveView::Chart(kind) = self.active_view else {
            return;
        };
        let summary = ExpenseSummary::generate(self.storage.store());
        let path = ExpensePaths::new(self.storage.path()).chart_file(kind);
        match export_svg(&summary, kind, self.settings.histogram_bins, &path) {
            Ok(()) => self.set_status(format!("Gráfico guardado en {}", path.display())),
            Err(e) => self.set_error(e.to_string()),
        }
    }
}
