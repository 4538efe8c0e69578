//! TUI Views module
//!
//! Contains the main views (expense list, chart) as well as the sidebar and
//! status bar.

pub mod chart;
pub mod expenses;
pub mod sidebar;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Expenses => expenses::render(frame, app, layout.main),
        ActiveView::Chart(kind) => chart::render(frame, app, kind, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::ExpenseForm(_) => dialogs::expense::render(frame, &app.expense_form),
        ActiveDialog::ConfirmDelete(id) => {
            let mut details = Vec::new();
            if let Ok(expense) = app.storage.store().get(id) {
                details.push(format!(
                    "{}  {}  {}",
                    expense.date,
                    expense.category,
                    expense
                        .amount
                        .format_with_symbol(&app.settings.currency_symbol)
                ));
                if !expense.description.is_empty() {
                    details.push(expense.description.clone());
                }
            }
            dialogs::confirm::render(
                frame,
                "Eliminar gasto",
                &format!("¿Eliminar el gasto {}?", id),
                &details,
            );
        }
        ActiveDialog::ConfirmQuit => dialogs::confirm::render(
            frame,
            "Salir",
            "Hay cambios sin guardar. ¿Guardar antes de salir?",
            &[],
        ),
        ActiveDialog::Generate => dialogs::prompt::render(
            frame,
            "Generar datos de prueba",
            &app.generate_input,
            app.dialog_error.as_deref(),
            "Cantidad de gastos aleatorios a agregar (1-1000)",
        ),
        ActiveDialog::Import => dialogs::prompt::render(
            frame,
            "Importar",
            &app.import_input,
            app.dialog_error.as_deref(),
            "Los gastos del archivo se agregan con IDs nuevos",
        ),
        ActiveDialog::ChartSelect => dialogs::chart_select::render(frame, app.chart_select_index),
        ActiveDialog::SaveFormat => dialogs::save::render(frame, &app.save_form),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::IdScheme;
    use crate::reports::ChartKind;
    use crate::storage::Storage;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(110, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app_with_rows<'a>(storage: &'a mut Storage, settings: &'a Settings) -> App<'a> {
        let mut app = App::new(storage, settings);
        for (category, description, amount) in
            [("Comida", "Almuerzo", "12.50"), ("Transporte", "Bus", "1.20")]
        {
            app.open_dialog(ActiveDialog::ExpenseForm(None));
            app.expense_form.category_input.set_value(category);
            app.expense_form.description_input.set_value(description);
            app.expense_form.amount_input.set_value(amount);
            app.submit_expense_form();
        }
        app
    }

    #[test]
    fn test_main_screen() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let app = app_with_rows(&mut storage, &settings);

        let text = screen_text(&app);
        assert!(text.contains("Acciones"));
        assert!(text.contains("Almuerzo"));
        assert!(text.contains("$12.50"));
        assert!(text.contains("[sin guardar]"));
    }

    #[test]
    fn test_empty_screen_hint() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let app = App::new(&mut storage, &settings);

        let text = screen_text(&app);
        assert!(text.contains("No hay gastos"));
    }

    #[test]
    fn test_dialogs_render() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = app_with_rows(&mut storage, &settings);

        app.open_dialog(ActiveDialog::SaveFormat);
        assert!(screen_text(&app).contains("Guardar / Exportar"));

        app.open_dialog(ActiveDialog::ConfirmDelete(crate::models::ExpenseId::Seq(1)));
        let text = screen_text(&app);
        assert!(text.contains("Eliminar gasto"));
        assert!(text.contains("Almuerzo"));

        app.open_dialog(ActiveDialog::ExpenseForm(None));
        assert!(screen_text(&app).contains("Nuevo gasto"));

        app.open_dialog(ActiveDialog::ChartSelect);
        assert!(screen_text(&app).contains("Histograma"));
    }

    #[test]
    fn test_every_chart_renders() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = app_with_rows(&mut storage, &settings);

        for kind in ChartKind::ALL_KINDS {
            app.show_chart(kind);
            let text = screen_text(&app);
            assert!(text.contains(kind.title()), "{}", kind);
        }
    }
}
